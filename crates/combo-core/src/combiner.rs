//! Combined URL construction and tag rendering.
//!
//! A group's resource references collapse into one URL of the form
//! `//{host}{base_path}{path1}{sep}{path2}...`, where the host comes from the
//! first reference and every later reference contributes only its path.

use std::borrow::Cow;

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use url::Url;

use crate::attributes::AttributeMap;
use crate::kind::TagKind;

/// Characters left unescaped by `encodeURI`: A-Z a-z 0-9 ; , / ? : @ & = + $ - _ . ! ~ * ' ( ) #
const URI_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b';')
    .remove(b',')
    .remove(b'/')
    .remove(b'?')
    .remove(b':')
    .remove(b'@')
    .remove(b'&')
    .remove(b'=')
    .remove(b'+')
    .remove(b'$')
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')')
    .remove(b'#');

/// Percent-encode a full URL, keeping URL delimiters intact.
fn encode_uri(input: &str) -> String {
    utf8_percent_encode(input, URI_ENCODE_SET).to_string()
}

/// Host and path of a resource reference.
#[derive(Debug, PartialEq, Eq)]
struct ResourceParts<'a> {
    /// Host with explicit port, empty for relative references.
    host: String,
    pathname: &'a str,
}

/// Cut `path` at its query string or fragment.
fn strip_query(path: &str) -> &str {
    path.find(['?', '#']).map_or(path, |end| &path[..end])
}

/// Split a resource reference into host and path.
///
/// Protocol-relative references (`//cdn/x.js`) are read as `http:`. Anything
/// that does not parse as an absolute URL with a host is treated as a bare
/// path, cut at the first `?` or `#`. The path is always a slice of
/// `reference`, so existing escapes such as `%2F` survive untouched.
fn resource_parts(reference: &str) -> ResourceParts<'_> {
    let absolute: Cow<'_, str> = if reference.starts_with("//") {
        Cow::Owned(format!("http:{reference}"))
    } else {
        Cow::Borrowed(reference)
    };

    if let Ok(url) = Url::parse(&absolute)
        && let Some(host) = url.host_str()
    {
        let host = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_owned(),
        };
        let authority = reference.find("//").map_or(reference, |i| &reference[i + 2..]);
        let pathname = match authority.find(['/', '?', '#']) {
            Some(start) => strip_query(&authority[start..]),
            None => "",
        };
        return ResourceParts {
            host,
            pathname: if pathname.is_empty() { "/" } else { pathname },
        };
    }

    ResourceParts {
        host: String::new(),
        pathname: strip_query(reference),
    }
}

/// Builds combo URLs and replacement tags.
#[derive(Debug, Clone)]
pub struct UrlCombiner {
    base_path: String,
    separator: String,
}

impl UrlCombiner {
    /// Create a combiner for a combo endpoint.
    ///
    /// # Arguments
    ///
    /// * `base_path` - Path prefix of the combo endpoint (e.g. `/c/=`)
    /// * `separator` - Joiner between combined paths (e.g. `,`)
    #[must_use]
    pub fn new(base_path: impl Into<String>, separator: impl Into<String>) -> Self {
        Self {
            base_path: base_path.into(),
            separator: separator.into(),
        }
    }

    /// Build the combined, percent-encoded URL for a list of resource references.
    ///
    /// A single reference is returned without its query string and without the
    /// base path, since nothing is combined. An empty list yields an empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use combo_core::UrlCombiner;
    ///
    /// let combiner = UrlCombiner::new("/c/=", ",");
    /// assert_eq!(
    ///     combiner.combine_url(&["//cdn.example.com/a.js?v=1", "/b.js"]),
    ///     "//cdn.example.com/c/=/a.js,/b.js"
    /// );
    /// assert_eq!(combiner.combine_url(&["/a.js?v=1"]), "/a.js");
    /// ```
    #[must_use]
    pub fn combine_url(&self, references: &[&str]) -> String {
        let joined = match references {
            [] => String::new(),
            [single] => single.split('?').next().unwrap_or_default().to_owned(),
            [first, rest @ ..] => {
                let first = resource_parts(first);
                let mut fragments = Vec::with_capacity(rest.len() + 1);
                fragments.push(format!(
                    "//{}{}{}",
                    first.host, self.base_path, first.pathname
                ));
                fragments.extend(
                    rest.iter()
                        .map(|reference| resource_parts(reference).pathname.to_owned()),
                );
                fragments.join(&self.separator)
            }
        };
        encode_uri(&joined)
    }

    /// Render a tag of `kind` pointing at `url`.
    ///
    /// `src` and `href` are dropped from `attributes`; the resource reference
    /// is always the given URL.
    #[must_use]
    pub fn render_tag(&self, kind: TagKind, url: &str, attributes: &AttributeMap) -> String {
        let mut attributes = attributes.clone();
        attributes.remove("src");
        attributes.remove("href");
        kind.render(&attributes.to_attr_string(), url)
    }

    /// Build the replacement tag for a group.
    ///
    /// `references` are the group's resource references in document order and
    /// `merged_attributes` the union of the members' attributes (later wins).
    #[must_use]
    pub fn build_combined_tag(
        &self,
        kind: TagKind,
        references: &[&str],
        merged_attributes: &AttributeMap,
    ) -> String {
        self.render_tag(kind, &self.combine_url(references), merged_attributes)
    }
}
