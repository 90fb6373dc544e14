//! `combo inspect` command implementation.

use std::path::PathBuf;

use clap::Args;

use super::ConfigArgs;
use crate::error::CliError;
use crate::input::Input;
use crate::output::Output;

/// Arguments for the inspect command.
#[derive(Args)]
pub(crate) struct InspectArgs {
    /// HTML files to inspect ("-" or none reads stdin).
    files: Vec<PathBuf>,

    #[command(flatten)]
    config: ConfigArgs,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

impl InspectArgs {
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let processor = self.config.processor()?;

        for input in Input::from_args(&self.files) {
            let report = processor.process(&input.read()?).report;
            output.heading(&input.label());
            if report.groups.is_empty() {
                output.info("  no combinable groups");
            }
            output.report(&report);
            output.info(&format!(
                "  {} tag(s) in {} group(s), {} tag(s) left unchanged",
                report.combined_tag_count(),
                report.groups.len(),
                report.skipped.len()
            ));
        }
        Ok(())
    }
}
