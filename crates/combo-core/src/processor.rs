//! Rewrite pipeline.
//!
//! For each tag kind (scripts first, then links) the processor matches tags,
//! groups them by combine-group name, and replaces every group with a single
//! combined tag placed where the group's last member stood. Other members are
//! removed. Edits are applied by byte span in one pass, so identical tag text
//! elsewhere in the document is never touched by mistake.

use std::ops::Range;

use crate::attributes::{AttrValue, AttributeMap};
use crate::combiner::UrlCombiner;
use crate::config::ComboConfig;
use crate::group::group_tags;
use crate::kind::TagKind;
use crate::matcher::find_tags;
use crate::report::{CombinedGroup, ComboReport, ProcessOutput, SkippedTag};

/// Replacement of a byte range.
type Edit = (Range<usize>, String);

/// Combines grouped `<script>` and `<link>` tags in HTML markup.
///
/// # Example
///
/// ```
/// use combo_core::ComboProcessor;
///
/// let processor = ComboProcessor::default();
/// let html = concat!(
///     r#"<script src="/a.js" data-combo="app"></script>"#,
///     r#"<script src="/b.js" data-combo="app"></script>"#,
/// );
/// let output = processor.process(html);
/// assert_eq!(output.html, r#"<script src="///c/=/a.js,/b.js"></script>"#);
/// assert_eq!(output.report.groups.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ComboProcessor {
    config: ComboConfig,
    combiner: UrlCombiner,
}

impl Default for ComboProcessor {
    fn default() -> Self {
        Self::new(ComboConfig::default())
    }
}

impl ComboProcessor {
    #[must_use]
    pub fn new(config: ComboConfig) -> Self {
        let combiner = UrlCombiner::new(config.base_path.clone(), config.separator.clone());
        Self { config, combiner }
    }

    /// Rewrite `content`, returning the new markup and a report.
    ///
    /// Never fails: tags that cannot be combined are left unchanged and listed
    /// in [`ComboReport::skipped`].
    #[must_use]
    pub fn process(&self, content: &str) -> ProcessOutput {
        let mut report = ComboReport::default();
        let mut html = content.to_owned();
        for kind in TagKind::ALL {
            html = self.process_kind(&html, kind, &mut report);
        }
        ProcessOutput { html, report }
    }

    /// Rewrite `content`, discarding the report.
    #[must_use]
    pub fn process_str(&self, content: &str) -> String {
        self.process(content).html
    }

    fn process_kind(&self, html: &str, kind: TagKind, report: &mut ComboReport) -> String {
        let key = kind.resource_key();
        let tags = find_tags(html, self.config.selectors.get(kind));
        let grouping = group_tags(tags, key);

        for (tag, reason) in grouping.skipped {
            tracing::debug!(kind = %kind, tag = %tag.raw, reason = %reason, "Skipped tag");
            report.skipped.push(SkippedTag {
                kind,
                raw: tag.raw,
                span: tag.span,
                reason,
            });
        }

        let mut edits: Vec<Edit> = Vec::new();
        for group in grouping.groups {
            let Some((last, rest)) = group.tags.split_last() else {
                continue;
            };

            let mut merged = AttributeMap::new();
            let mut references = Vec::with_capacity(group.tags.len());
            for tag in &group.tags {
                if let Some(reference) = tag.attributes.get(key).and_then(AttrValue::as_str) {
                    references.push(reference);
                }
                merged.merge(&tag.attributes);
            }

            let url = self.combiner.combine_url(&references);
            let combined = self.combiner.render_tag(kind, &url, &merged);
            tracing::debug!(
                kind = %kind,
                group = %group.name,
                tags = group.tags.len(),
                url = %url,
                "Combined group"
            );

            edits.extend(rest.iter().map(|tag| (tag.span.clone(), String::new())));
            edits.push((last.span.clone(), combined));
            report.groups.push(CombinedGroup {
                kind,
                name: group.name.clone(),
                tag_count: group.tags.len(),
                url,
            });
        }

        apply_edits(html, edits)
    }
}

/// Apply non-overlapping span replacements.
fn apply_edits(html: &str, mut edits: Vec<Edit>) -> String {
    if edits.is_empty() {
        return html.to_owned();
    }
    edits.sort_by_key(|(span, _)| span.start);

    let mut result = String::with_capacity(html.len());
    let mut cursor = 0;
    for (span, replacement) in edits {
        result.push_str(&html[cursor..span.start]);
        result.push_str(&replacement);
        cursor = span.end;
    }
    result.push_str(&html[cursor..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Selectors;
    use crate::group::SkipReason;
    use pretty_assertions::assert_eq;

    fn process(html: &str) -> ProcessOutput {
        ComboProcessor::default().process(html)
    }

    #[test]
    fn test_no_groups_is_passthrough() {
        let html = concat!(
            "<html><head>\n",
            r#"<script src="/a.js"></script>"#,
            "\n",
            r#"<link rel="stylesheet" href="/a.css"/>"#,
            "\n<script>var x = 1;</script>\n</head></html>"
        );
        let output = process(html);
        assert_eq!(output.html, html);
        assert!(output.report.groups.is_empty());
        assert_eq!(output.report.skipped.len(), 3);
        assert_eq!(output.report.malformed().count(), 0);
    }

    #[test]
    fn test_combine_scripts() {
        let html = concat!(
            r#"<script src="/a.js?v=1" data-combo="g1"></script>"#,
            r#"<script src="/b.js" data-combo="g1"></script>"#,
        );
        let output = process(html);
        assert_eq!(
            output.html,
            r#"<script src="///c/=/a.js,/b.js"></script>"#
        );
        assert_eq!(
            output.report.groups,
            vec![CombinedGroup {
                kind: TagKind::Script,
                name: "g1".to_owned(),
                tag_count: 2,
                url: "///c/=/a.js,/b.js".to_owned(),
            }]
        );
    }

    #[test]
    fn test_combined_tag_lands_at_last_member() {
        let html = concat!(
            "<head>",
            r#"<script src="//cdn.x.com/a.js" data-combo="lib"></script>"#,
            "<title>T</title>",
            r#"<script src="//cdn.x.com/b.js" data-combo="lib"></script>"#,
            "<meta charset=\"utf-8\">",
            r#"<script src="//cdn.x.com/c.js" data-combo="lib"></script>"#,
            "</head>",
        );
        assert_eq!(
            process(html).html,
            concat!(
                "<head><title>T</title><meta charset=\"utf-8\">",
                r#"<script src="//cdn.x.com/c/=/a.js,/b.js,/c.js"></script>"#,
                "</head>",
            )
        );
    }

    #[test]
    fn test_independent_groups_keep_order() {
        let html = concat!(
            r#"<script src="/a.js" data-combo="one"></script>"#,
            r#"<script src="/x.js" data-combo="two"></script>"#,
            r#"<script src="/b.js" data-combo="one"></script>"#,
            r#"<script src="/y.js" data-combo="two"></script>"#,
        );
        assert_eq!(
            process(html).html,
            concat!(
                r#"<script src="///c/=/a.js,/b.js"></script>"#,
                r#"<script src="///c/=/x.js,/y.js"></script>"#,
            )
        );
    }

    #[test]
    fn test_single_member_group_strips_query_only() {
        let html = r#"<p>x</p><script src="/app.js?v=3" data-combo="solo" defer></script>"#;
        assert_eq!(
            process(html).html,
            r#"<p>x</p><script defer="true" src="/app.js"></script>"#
        );
    }

    #[test]
    fn test_later_attribute_wins() {
        let html = concat!(
            r#"<script src="/a.js" type="text/a" data-combo="g"></script>"#,
            r#"<script src="/b.js" type="text/b" data-combo="g"></script>"#,
        );
        let output = process(html).html;
        assert!(output.contains(r#"type="text/b""#));
        assert!(!output.contains("text/a"));
        assert!(!output.contains("data-combo"));
    }

    #[test]
    fn test_combine_links() {
        let html = concat!(
            r#"<link rel="stylesheet" href="//s.cdn.com/a.css" data-combo="css"/>"#,
            r#"<link rel="icon" href="/favicon.ico">"#,
            r#"<link rel="stylesheet" href="//s.cdn.com/b.css?v=9" data-combo="css">"#,
        );
        assert_eq!(
            process(html).html,
            concat!(
                r#"<link rel="icon" href="/favicon.ico">"#,
                r#"<link rel="stylesheet" href="//s.cdn.com/c/=/a.css,/b.css"/>"#,
            )
        );
    }

    #[test]
    fn test_scripts_and_links_in_one_document() {
        let html = concat!(
            r#"<link rel="stylesheet" href="/a.css" data-combo="s"/>"#,
            r#"<link rel="stylesheet" href="/b.css" data-combo="s"/>"#,
            r#"<script src="/a.js" data-combo="s"></script>"#,
            r#"<script src="/b.js" data-combo="s"></script>"#,
        );
        let output = process(html);
        assert_eq!(
            output.html,
            concat!(
                r#"<link rel="stylesheet" href="///c/=/a.css,/b.css"/>"#,
                r#"<script src="///c/=/a.js,/b.js"></script>"#,
            )
        );
        let kinds: Vec<_> = output.report.groups.iter().map(|g| g.kind).collect();
        assert_eq!(kinds, vec![TagKind::Script, TagKind::Link]);
    }

    #[test]
    fn test_identical_text_outside_group_untouched() {
        // The template body contains the member's exact text, but it is part
        // of an earlier, ungrouped match and must survive.
        let template = r#"<script type="text/template"><script src="/a.js" data-combo="g"></script>"#;
        let html = format!(
            "{template}{}{}",
            r#"<script src="/a.js" data-combo="g"></script>"#,
            r#"<script src="/b.js" data-combo="g"></script>"#,
        );
        let output = process(&html);
        assert_eq!(
            output.html,
            format!("{template}{}", r#"<script src="///c/=/a.js,/b.js"></script>"#)
        );
        assert_eq!(output.report.skipped[0].raw, template);
    }

    #[test]
    fn test_unmerged_link_unchanged() {
        let html = r#"<link rel="stylesheet" href="/plain.css"/>"#;
        let output = process(html);
        assert_eq!(output.html, html);
        assert_eq!(output.report.skipped[0].reason, SkipReason::NoCombineGroup);
        assert_eq!(output.report.skipped[0].kind, TagKind::Link);
    }

    #[test]
    fn test_malformed_tags_reported() {
        let html = concat!(
            r#"<script data-combo="g">inline()</script>"#,
            r#"<link rel="stylesheet" data-combo="g"/>"#,
        );
        let output = process(html);
        assert_eq!(output.html, html);
        let malformed: Vec<_> = output
            .report
            .malformed()
            .map(|t| (t.kind, t.reason))
            .collect();
        assert_eq!(
            malformed,
            vec![
                (TagKind::Script, SkipReason::MissingResource),
                (TagKind::Link, SkipReason::MissingResource),
            ]
        );
    }

    #[test]
    fn test_valueless_combine_attribute_combines() {
        let output = process(concat!(
            r#"<script src="/a.js" data-combo></script>"#,
            r#"<script src="/b.js" data-combo></script>"#,
        ));
        assert_eq!(output.html, r#"<script src="///c/=/a.js,/b.js"></script>"#);
        assert_eq!(output.report.groups[0].name, "true");
        assert_eq!(output.report.groups[0].tag_count, 2);
    }

    #[test]
    fn test_second_run_is_noop() {
        let processor = ComboProcessor::default();
        let html = concat!(
            r#"<script src="/a.js" data-combo="g"></script>"#,
            r#"<script src="/b.js" data-combo="g"></script>"#,
        );
        let once = processor.process_str(html);
        assert_eq!(processor.process_str(&once), once);
    }

    #[test]
    fn test_custom_config() {
        let config = ComboConfig {
            base_path: "/combo/".to_owned(),
            separator: ";".to_owned(),
            selectors: Selectors::new(Some(r"(?s)<(SCRIPT)([^>]*)>(.*?)</SCRIPT>"), None).unwrap(),
        };
        let html = concat!(
            r#"<SCRIPT src="//h.com/a.js" data-combo="g"></SCRIPT>"#,
            r#"<SCRIPT src="//h.com/b.js" data-combo="g"></SCRIPT>"#,
        );
        assert_eq!(
            ComboProcessor::new(config).process_str(html),
            r#"<script src="//h.com/combo//a.js;/b.js"></script>"#
        );
    }

    #[test]
    fn test_apply_edits_out_of_order() {
        let edits = vec![(6..7, "Z".to_owned()), (0..1, String::new())];
        assert_eq!(apply_edits("abcdefg", edits), "bcdefZ");
    }
}
