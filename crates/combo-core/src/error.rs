//! Error types for selector configuration.

use crate::kind::TagKind;

/// Error building a [`ComboConfig`](crate::ComboConfig).
///
/// Rewriting itself never fails; only invalid custom selectors are rejected.
#[derive(Debug, thiserror::Error)]
pub enum ComboError {
    /// Selector pattern does not compile.
    #[error("invalid {kind} selector: {source}")]
    InvalidSelector {
        kind: TagKind,
        #[source]
        source: regex::Error,
    },
    /// Selector lacks the name and attribute capture groups.
    #[error("{kind} selector needs at least 2 capture groups (tag name, attributes), found {found}")]
    MissingCaptureGroups { kind: TagKind, found: usize },
}
