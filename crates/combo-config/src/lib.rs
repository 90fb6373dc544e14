//! Configuration management for the combo rewriter.
//!
//! Parses `combo.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Example
//!
//! ```toml
//! base_path = "/c/="
//! separator = ","
//!
//! [selectors]
//! script = '(?s)<(script)([^>]*)>(.*?)</script>'
//! link = '<(link)([^>]*?)/?>'
//! ```
//!
//! ## Environment Variable Expansion
//!
//! All string values support environment variable expansion:
//!
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

mod expand;

use std::path::{Path, PathBuf};

use combo_core::{ComboConfig, ComboError, DEFAULT_BASE_PATH, DEFAULT_SEPARATOR, Selectors};
use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "combo.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override combo endpoint prefix.
    pub base_path: Option<String>,
    /// Override path separator.
    pub separator: Option<String>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL path prefix of the combo endpoint.
    pub base_path: String,
    /// Joiner between combined resource paths.
    pub separator: String,
    /// Custom tag patterns.
    pub selectors: SelectorsConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_owned(),
            separator: DEFAULT_SEPARATOR.to_owned(),
            selectors: SelectorsConfig::default(),
            config_path: None,
        }
    }
}

/// Tag pattern overrides. Unset entries keep the built-in patterns.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SelectorsConfig {
    pub script: Option<String>,
    pub link: Option<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Invalid custom selector.
    #[error("Configuration error: {0}")]
    Selector(#[from] ComboError),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`selectors.script`").
        field: String,
        /// Error message (e.g., "${`COMBO_BASE`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `combo.toml` in current directory and parents,
    /// falling back to defaults when none exists.
    ///
    /// CLI settings are applied after loading and take precedence over file
    /// values. Scalar values are validated; selectors are compiled by
    /// [`Config::combo_config`].
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = std::env::current_dir()
            .ok()
            .and_then(|cwd| Self::discover_config(&cwd))
        {
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(base_path) = &settings.base_path {
            self.base_path.clone_from(base_path);
        }
        if let Some(separator) = &settings.separator {
            self.separator.clone_from(separator);
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.expand_env_vars()?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate scalar configuration values.
    ///
    /// Selectors are checked when [`Config::combo_config`] compiles them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for empty values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.base_path, "base_path")?;
        require_non_empty(&self.separator, "separator")?;
        Ok(())
    }

    /// Validate and build the rewriter configuration.
    ///
    /// Custom selectors are compiled here, once.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` for empty values and
    /// `ConfigError::Selector` if a custom selector is invalid.
    pub fn combo_config(&self) -> Result<ComboConfig, ConfigError> {
        self.validate()?;
        Ok(ComboConfig {
            base_path: self.base_path.clone(),
            separator: self.separator.clone(),
            selectors: self.compile_selectors()?,
        })
    }

    fn compile_selectors(&self) -> Result<Selectors, ConfigError> {
        Ok(Selectors::new(
            self.selectors.script.as_deref(),
            self.selectors.link.as_deref(),
        )?)
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.base_path = expand::expand_env(&self.base_path, "base_path")?;
        self.separator = expand::expand_env(&self.separator, "separator")?;

        if let Some(ref script) = self.selectors.script {
            self.selectors.script = Some(expand::expand_env(script, "selectors.script")?);
        }
        if let Some(ref link) = self.selectors.link {
            self.selectors.link = Some(expand::expand_env(link, "selectors.link")?);
        }

        Ok(())
    }
}
