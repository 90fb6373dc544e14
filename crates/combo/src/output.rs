//! Colored stderr reporting for CLI commands.
//!
//! Rewritten markup may go to stdout, so every message here goes to stderr.

use combo_core::{CombinedGroup, ComboReport, SkippedTag};
use console::{Style, Term};

/// Terminal reporter.
pub(crate) struct Output {
    term: Term,
    group: Style,
    skipped: Style,
    failure: Style,
    heading: Style,
}

impl Output {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            group: Style::new().green(),
            skipped: Style::new().yellow(),
            failure: Style::new().red(),
            heading: Style::new().cyan().bold(),
        }
    }

    fn line(&self, style: Option<&Style>, msg: &str) {
        let text = match style {
            Some(style) => style.apply_to(msg).to_string(),
            None => msg.to_owned(),
        };
        let _ = self.term.write_line(&text);
    }

    /// Plain message.
    pub(crate) fn info(&self, msg: &str) {
        self.line(None, msg);
    }

    /// Input name above its report.
    pub(crate) fn heading(&self, label: &str) {
        self.line(Some(&self.heading), label);
    }

    /// Final summary line (green).
    pub(crate) fn summary(&self, msg: &str) {
        self.line(Some(&self.group), msg);
    }

    /// Fatal error (red).
    pub(crate) fn error(&self, msg: &str) {
        self.line(Some(&self.failure), msg);
    }

    /// Combined groups, then tags that asked for combination but were skipped.
    pub(crate) fn report(&self, report: &ComboReport) {
        for group in &report.groups {
            self.line(None, &format_group(group));
        }
        for tag in report.malformed() {
            self.line(Some(&self.skipped), &format_skipped(tag));
        }
    }
}

fn format_group(group: &CombinedGroup) -> String {
    format!(
        "  {} \"{}\": {} tag(s) -> {}",
        group.kind, group.name, group.tag_count, group.url
    )
}

fn format_skipped(tag: &SkippedTag) -> String {
    format!(
        "  skipped {} at byte {} ({}): {}",
        tag.kind, tag.span.start, tag.reason, tag.raw
    )
}
