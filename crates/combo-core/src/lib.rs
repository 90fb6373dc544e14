//! Asset combo rewriting.
//!
//! Merges groups of `<script>` and `<link>` tags into single tags pointing at
//! a combo server, which serves several assets concatenated in one response:
//!
//! ```html
//! <script src="/a.js" data-combo="app"></script>
//! <script src="/b.js" data-combo="app"></script>
//! ```
//!
//! becomes `<script src="///c/=/a.js,/b.js"></script>`.
//!
//! # Architecture
//!
//! - [`attributes`]: attribute string parsing (`AttributeMap`)
//! - [`matcher`]: pattern-based tag discovery with byte spans
//! - [`group`]: partitioning by the `data-combo` attribute
//! - [`combiner`]: combined URL construction and tag rendering
//! - [`processor`]: the pipeline, run for scripts then links
//!
//! Rewriting is textual and best-effort. It never fails; tags that cannot be
//! combined are listed in the returned [`ComboReport`].

pub mod attributes;
pub mod combiner;
mod config;
mod error;
pub mod group;
mod kind;
pub mod matcher;
pub mod processor;
mod report;

pub use attributes::{AttrValue, AttributeMap, parse_attributes};
pub use combiner::UrlCombiner;
pub use config::{ComboConfig, DEFAULT_BASE_PATH, DEFAULT_SEPARATOR, Selectors};
pub use error::ComboError;
pub use group::{COMBINE_ATTRIBUTE, Grouping, SkipReason, TagGroup, group_tags};
pub use kind::TagKind;
pub use matcher::{TagRecord, find_tags};
pub use processor::ComboProcessor;
pub use report::{CombinedGroup, ComboReport, ProcessOutput, SkippedTag};
