//! Diagnostics collected while rewriting.

use std::ops::Range;

use crate::group::SkipReason;
use crate::kind::TagKind;

/// A group that was merged into one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombinedGroup {
    pub kind: TagKind,
    /// Combine-group name.
    pub name: String,
    /// Number of source tags merged.
    pub tag_count: usize,
    /// Resource URL of the emitted tag.
    pub url: String,
}

/// A matched tag left as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedTag {
    pub kind: TagKind,
    /// Exact source text of the tag.
    pub raw: String,
    /// Byte range in the markup of the pass that matched it.
    ///
    /// Links are matched after scripts have been rewritten, so link spans
    /// refer to that intermediate markup.
    pub span: Range<usize>,
    pub reason: SkipReason,
}

/// Everything a [`process`](crate::ComboProcessor::process) call did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboReport {
    pub groups: Vec<CombinedGroup>,
    pub skipped: Vec<SkippedTag>,
}

impl ComboReport {
    /// Number of source tags removed or replaced.
    pub fn combined_tag_count(&self) -> usize {
        self.groups.iter().map(|g| g.tag_count).sum()
    }

    /// Skipped tags that opted into combination but could not be grouped.
    ///
    /// Tags without a combine-group attribute are ordinary markup and are not
    /// included.
    pub fn malformed(&self) -> impl Iterator<Item = &SkippedTag> {
        self.skipped
            .iter()
            .filter(|tag| tag.reason != SkipReason::NoCombineGroup)
    }
}

/// Rewritten markup plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessOutput {
    pub html: String,
    pub report: ComboReport,
}
