//! Combine-group classification.
//!
//! Tags opt into combination with a `data-combo="name"` attribute. Tags
//! sharing a name form one group; tags without a name or without a resource
//! reference are left alone and reported as skipped.

use std::collections::HashMap;
use std::fmt;

use crate::attributes::AttrValue;
use crate::matcher::TagRecord;

/// Attribute marking group membership.
pub const COMBINE_ATTRIBUTE: &str = "data-combo";

/// Tags sharing one combine-group name, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagGroup {
    /// Value of the combine-group attribute.
    pub name: String,
    /// Member tags with the combine-group attribute already removed.
    pub tags: Vec<TagRecord>,
}

/// Why a tag was not placed in any group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// No combine-group attribute.
    NoCombineGroup,
    /// Combine-group present but the resource attribute is missing or empty.
    MissingResource,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCombineGroup => write!(f, "no {COMBINE_ATTRIBUTE} attribute"),
            Self::MissingResource => f.write_str("missing resource reference"),
        }
    }
}

/// Result of classifying a list of tags.
#[derive(Debug, Default)]
pub struct Grouping {
    /// Groups ordered by the position of their first member.
    pub groups: Vec<TagGroup>,
    /// Tags left out of every group.
    pub skipped: Vec<(TagRecord, SkipReason)>,
}

/// Partition tags into combine groups.
///
/// `resource_key` names the resource attribute (`src` or `href`). Grouped
/// tags lose their combine-group attribute so it is never re-emitted.
#[must_use]
pub fn group_tags(tags: Vec<TagRecord>, resource_key: &str) -> Grouping {
    let mut grouping = Grouping::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for mut tag in tags {
        let name = match combine_name(&tag, resource_key) {
            Ok(name) => name,
            Err(reason) => {
                grouping.skipped.push((tag, reason));
                continue;
            }
        };

        tag.attributes.remove(COMBINE_ATTRIBUTE);
        match index.get(&name) {
            Some(&i) => grouping.groups[i].tags.push(tag),
            None => {
                index.insert(name.clone(), grouping.groups.len());
                grouping.groups.push(TagGroup {
                    name,
                    tags: vec![tag],
                });
            }
        }
    }

    grouping
}

/// Combine-group name of a tag eligible for grouping.
///
/// A valueless `data-combo` names the group `true`.
fn combine_name(tag: &TagRecord, resource_key: &str) -> Result<String, SkipReason> {
    let name = tag
        .attributes
        .get(COMBINE_ATTRIBUTE)
        .ok_or(SkipReason::NoCombineGroup)?;
    match tag.attributes.get(resource_key) {
        Some(AttrValue::Value(_)) => Ok(name.rendered().to_owned()),
        _ => Err(SkipReason::MissingResource),
    }
}
