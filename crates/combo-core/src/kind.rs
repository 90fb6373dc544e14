//! Tag types the rewriter knows how to combine.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

/// Default pattern for `<script>` elements: name, attributes, inline body.
static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<(script)([^>]*)>(.*?)</script>").unwrap());

/// Default pattern for `<link>` elements: name, attributes.
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(link)([^>]*?)/?>").unwrap());

/// Kind of resource tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagKind {
    /// `<script src="...">` elements.
    Script,
    /// `<link href="...">` elements.
    Link,
}

impl TagKind {
    /// Tag kinds in processing order.
    pub const ALL: [TagKind; 2] = [TagKind::Script, TagKind::Link];

    /// Element name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Script => "script",
            Self::Link => "link",
        }
    }

    /// Attribute holding the resource reference.
    #[must_use]
    pub fn resource_key(self) -> &'static str {
        match self {
            Self::Script => "src",
            Self::Link => "href",
        }
    }

    /// Built-in matching pattern for this kind.
    #[must_use]
    pub fn default_selector(self) -> &'static Regex {
        match self {
            Self::Script => &*SCRIPT_RE,
            Self::Link => &*LINK_RE,
        }
    }

    /// Render a tag of this kind.
    ///
    /// `attrs` is a pre-serialized attribute string and is omitted when empty.
    #[must_use]
    pub fn render(self, attrs: &str, url: &str) -> String {
        let key = self.resource_key();
        let attrs = if attrs.is_empty() {
            String::new()
        } else {
            format!(" {attrs}")
        };
        match self {
            Self::Script => format!(r#"<script{attrs} {key}="{url}"></script>"#),
            Self::Link => format!(r#"<link{attrs} {key}="{url}"/>"#),
        }
    }
}

impl fmt::Display for TagKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
