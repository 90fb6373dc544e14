//! Attribute string parsing.
//!
//! Turns the raw text between a tag name and its closing `>` into an
//! [`AttributeMap`]. Parsing is best-effort: malformed fragments produce a
//! partial map and never an error.

use std::sync::LazyLock;

use regex::Regex;

/// One attribute token: a name, optionally followed by `=` and a quoted or bare value.
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([^=<>"'\s]+)\s*(?:=\s*["']?([^"']*)["']?)?"#).unwrap()
});

/// Value of a single attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttrValue {
    /// Attribute with an explicit, non-empty value.
    Value(String),
    /// Valueless attribute such as `async` (boolean `true`).
    Flag,
}

impl AttrValue {
    /// Explicit value, or `None` for a flag.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Value(value) => Some(value),
            Self::Flag => None,
        }
    }

    /// Text written into a generated tag. Flags render as `true`.
    #[must_use]
    pub fn rendered(&self) -> &str {
        match self {
            Self::Value(value) => value,
            Self::Flag => "true",
        }
    }
}

/// Attribute name to value mapping.
///
/// Lookups are by exact (case-sensitive) name. Iteration follows the order in
/// which names were first inserted; overwriting a name keeps its position.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeMap {
    entries: Vec<(String, AttrValue)>,
}

impl AttributeMap {
    /// Create an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AttrValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Insert an attribute, replacing the value of an existing name in place.
    pub fn insert(&mut self, name: impl Into<String>, value: AttrValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Remove an attribute, returning its value if it was present.
    pub fn remove(&mut self, name: &str) -> Option<AttrValue> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Copy every attribute of `other` into this map. Values from `other` win.
    pub fn merge(&mut self, other: &AttributeMap) {
        for (name, value) in &other.entries {
            self.insert(name.clone(), value.clone());
        }
    }

    /// Attributes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Serialize as space-separated `name="value"` pairs.
    #[must_use]
    pub fn to_attr_string(&self) -> String {
        self.iter()
            .map(|(name, value)| format!(r#"{name}="{}""#, value.rendered()))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Parse a raw attribute string.
///
/// Attributes without a value, or with an empty one, become [`AttrValue::Flag`].
/// When a name repeats, the last occurrence wins.
///
/// # Examples
///
/// ```
/// use combo_core::{AttrValue, parse_attributes};
///
/// let attrs = parse_attributes(r#" src="/a.js" async"#);
/// assert_eq!(attrs.get("src"), Some(&AttrValue::Value("/a.js".to_owned())));
/// assert_eq!(attrs.get("async"), Some(&AttrValue::Flag));
/// ```
#[must_use]
pub fn parse_attributes(attr_str: &str) -> AttributeMap {
    let mut attributes = AttributeMap::new();
    for caps in ATTRIBUTE_RE.captures_iter(attr_str) {
        let value = caps
            .get(2)
            .map(|m| m.as_str())
            .filter(|v| !v.is_empty())
            .map_or(AttrValue::Flag, |v| AttrValue::Value(v.to_owned()));
        attributes.insert(&caps[1], value);
    }
    attributes
}
