//! Tag discovery.
//!
//! Scans markup with a per-kind pattern and records every match together with
//! its byte span, so later rewriting can work on positions instead of
//! searching for the raw text again.

use std::ops::Range;

use regex::Regex;

use crate::attributes::{AttributeMap, parse_attributes};

/// A tag found in the markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRecord {
    /// Element name as captured (e.g. `script`).
    pub name: String,
    /// Parsed attributes.
    pub attributes: AttributeMap,
    /// Exact matched text.
    pub raw: String,
    /// Byte range of `raw` in the scanned markup.
    pub span: Range<usize>,
}

/// Find all tags matched by `pattern`, in document order.
///
/// The pattern is expected to capture the tag name in group 1 and the
/// attribute text in group 2. Further groups (such as a script body) are
/// ignored. Missing groups are treated as empty.
#[must_use]
pub fn find_tags(markup: &str, pattern: &Regex) -> Vec<TagRecord> {
    pattern
        .captures_iter(markup)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let name = caps.get(1).map_or("", |m| m.as_str());
            let attrs = caps.get(2).map_or("", |m| m.as_str());
            Some(TagRecord {
                name: name.to_owned(),
                attributes: parse_attributes(attrs),
                raw: whole.as_str().to_owned(),
                span: whole.range(),
            })
        })
        .collect()
}
