//! Rewriter configuration.

use regex::Regex;

use crate::error::ComboError;
use crate::kind::TagKind;

/// Default combo endpoint prefix.
pub const DEFAULT_BASE_PATH: &str = "/c/=";

/// Default joiner between combined paths.
pub const DEFAULT_SEPARATOR: &str = ",";

/// Matching patterns, one per tag kind.
#[derive(Debug, Clone)]
pub struct Selectors {
    script: Regex,
    link: Regex,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            script: TagKind::Script.default_selector().clone(),
            link: TagKind::Link.default_selector().clone(),
        }
    }
}

impl Selectors {
    /// Compile custom selectors.
    ///
    /// `None` keeps the built-in pattern for that kind. Each pattern must
    /// capture the tag name (group 1) and the attribute text (group 2).
    pub fn new(script: Option<&str>, link: Option<&str>) -> Result<Self, ComboError> {
        let mut selectors = Self::default();
        if let Some(pattern) = script {
            selectors.script = compile_selector(TagKind::Script, pattern)?;
        }
        if let Some(pattern) = link {
            selectors.link = compile_selector(TagKind::Link, pattern)?;
        }
        Ok(selectors)
    }

    /// Pattern used for `kind`.
    #[must_use]
    pub fn get(&self, kind: TagKind) -> &Regex {
        match kind {
            TagKind::Script => &self.script,
            TagKind::Link => &self.link,
        }
    }
}

fn compile_selector(kind: TagKind, pattern: &str) -> Result<Regex, ComboError> {
    let regex = Regex::new(pattern).map_err(|source| ComboError::InvalidSelector { kind, source })?;
    // captures_len counts the implicit whole-match group.
    let found = regex.captures_len() - 1;
    if found < 2 {
        return Err(ComboError::MissingCaptureGroups { kind, found });
    }
    Ok(regex)
}

/// Immutable settings for a [`ComboProcessor`](crate::ComboProcessor).
#[derive(Debug, Clone)]
pub struct ComboConfig {
    /// URL path prefix of the combo endpoint.
    pub base_path: String,
    /// Joiner between combined resource paths.
    pub separator: String,
    pub selectors: Selectors,
}

impl Default for ComboConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_owned(),
            separator: DEFAULT_SEPARATOR.to_owned(),
            selectors: Selectors::default(),
        }
    }
}
