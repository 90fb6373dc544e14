//! CLI command implementations.

mod inspect;
mod process;

use std::path::PathBuf;

use clap::Args;
use combo_config::{CliSettings, Config};
use combo_core::ComboProcessor;

use crate::error::CliError;

pub(crate) use inspect::InspectArgs;
pub(crate) use process::ProcessArgs;

/// Configuration arguments shared by all commands.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover combo.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Combo endpoint path prefix (overrides config).
    #[arg(long, env = "COMBO_BASE_PATH")]
    base_path: Option<String>,

    /// Separator between combined paths (overrides config).
    #[arg(long)]
    separator: Option<String>,
}

impl ConfigArgs {
    /// Load configuration and build a processor.
    pub(crate) fn processor(&self) -> Result<ComboProcessor, CliError> {
        let cli_settings = CliSettings {
            base_path: self.base_path.clone(),
            separator: self.separator.clone(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }
        Ok(ComboProcessor::new(config.combo_config()?))
    }
}
