//! Input and output locations for CLI commands.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::error::CliError;

/// Source of markup to rewrite.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    /// Resolve positional file arguments. No files, or `-`, means stdin.
    pub(crate) fn from_args(files: &[PathBuf]) -> Vec<Self> {
        if files.is_empty() {
            return vec![Self::Stdin];
        }
        files
            .iter()
            .map(|path| {
                if path.as_os_str() == "-" {
                    Self::Stdin
                } else {
                    Self::File(path.clone())
                }
            })
            .collect()
    }

    /// Name used in messages.
    pub(crate) fn label(&self) -> String {
        match self {
            Self::Stdin => "<stdin>".to_owned(),
            Self::File(path) => path.display().to_string(),
        }
    }

    pub(crate) fn read(&self) -> Result<String, CliError> {
        match self {
            Self::Stdin => {
                let mut content = String::new();
                std::io::stdin().read_to_string(&mut content)?;
                Ok(content)
            }
            Self::File(path) => std::fs::read_to_string(path).map_err(|source| CliError::File {
                path: path.clone(),
                source,
            }),
        }
    }
}

/// Write rewritten markup to `dest`, or stdout when `None`.
pub(crate) fn write_output(dest: Option<&Path>, content: &str) -> Result<(), CliError> {
    match dest {
        Some(path) => std::fs::write(path, content).map_err(|source| CliError::File {
            path: path.to_path_buf(),
            source,
        }),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_no_files_reads_stdin() {
        assert_eq!(Input::from_args(&[]), vec![Input::Stdin]);
    }

    #[test]
    fn test_dash_is_stdin() {
        let inputs = Input::from_args(&[PathBuf::from("a.html"), PathBuf::from("-")]);
        assert_eq!(
            inputs,
            vec![Input::File(PathBuf::from("a.html")), Input::Stdin]
        );
    }

    #[test]
    fn test_label() {
        assert_eq!(Input::Stdin.label(), "<stdin>");
        assert_eq!(Input::File(PathBuf::from("site/index.html")).label(), "site/index.html");
    }

    #[test]
    fn test_read_missing_file_names_path() {
        let err = Input::File(PathBuf::from("/nonexistent/page.html"))
            .read()
            .unwrap_err();
        assert!(err.to_string().starts_with("/nonexistent/page.html: "));
    }

    #[test]
    fn test_write_output_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.html");
        write_output(Some(&path), "<p>ok</p>").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "<p>ok</p>");
    }
}
