//! `combo process` command implementation.

use std::path::PathBuf;

use clap::Args;
use combo_core::ComboProcessor;

use super::ConfigArgs;
use crate::error::CliError;
use crate::input::{Input, write_output};
use crate::output::Output;

/// Arguments for the process command.
#[derive(Args)]
pub(crate) struct ProcessArgs {
    /// HTML files to rewrite ("-" or none reads stdin).
    files: Vec<PathBuf>,

    /// Write the result to this file instead of stdout (single input only).
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rewrite each input file in place.
    #[arg(short, long, conflicts_with = "output")]
    in_place: bool,

    #[command(flatten)]
    config: ConfigArgs,

    /// Enable verbose output (debug logs for every skipped tag).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ProcessArgs {
    /// Execute the process command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails, arguments conflict, or an
    /// input cannot be read or written.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let inputs = Input::from_args(&self.files);
        self.check_inputs(&inputs)?;
        let processor = self.config.processor()?;

        let mut total_groups = 0;
        for input in &inputs {
            let groups = if self.in_place {
                rewrite_in_place(&processor, input, &output)?
            } else {
                let result = processor.process(&input.read()?);
                write_output(self.output.as_deref(), &result.html)?;
                output.report(&result.report);
                result.report.groups.len()
            };
            total_groups += groups;
        }

        output.summary(&format!(
            "Combined {total_groups} group(s) in {} input(s)",
            inputs.len()
        ));
        Ok(())
    }

    fn check_inputs(&self, inputs: &[Input]) -> Result<(), CliError> {
        if self.in_place {
            if inputs.contains(&Input::Stdin) {
                return Err(CliError::Validation(
                    "--in-place cannot be used with stdin".to_owned(),
                ));
            }
        } else if inputs.len() > 1 {
            return Err(CliError::Validation(
                "multiple inputs require --in-place".to_owned(),
            ));
        }
        Ok(())
    }
}

/// Rewrite one file in place, returning the number of combined groups.
///
/// Files without combinable groups are not written.
fn rewrite_in_place(
    processor: &ComboProcessor,
    input: &Input,
    output: &Output,
) -> Result<usize, CliError> {
    let Input::File(path) = input else {
        return Err(CliError::Validation(
            "--in-place cannot be used with stdin".to_owned(),
        ));
    };

    let result = processor.process(&input.read()?);
    output.heading(&input.label());
    output.report(&result.report);
    if !result.report.groups.is_empty() {
        write_output(Some(path), &result.html)?;
    }
    Ok(result.report.groups.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_rewrite_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("index.html");
        std::fs::write(
            &path,
            concat!(
                r#"<link rel="stylesheet" href="/a.css" data-combo="css"/>"#,
                r#"<link rel="stylesheet" href="/b.css" data-combo="css"/>"#,
            ),
        )
        .unwrap();

        let groups = rewrite_in_place(
            &ComboProcessor::default(),
            &Input::File(path.clone()),
            &Output::new(),
        )
        .unwrap();

        assert_eq!(groups, 1);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            r#"<link rel="stylesheet" href="///c/=/a.css,/b.css"/>"#
        );
    }

    #[test]
    fn test_rewrite_in_place_rejects_stdin() {
        let err = rewrite_in_place(&ComboProcessor::default(), &Input::Stdin, &Output::new())
            .unwrap_err();
        assert!(matches!(err, CliError::Validation(_)));
    }
}
