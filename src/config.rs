//! Configuration for figure rendering and the overview report.
//!
//! YAML with precedence: explicit path > `TRUENO_EDA_CONFIG` > user config dir > defaults.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming a configuration file.
pub const CONFIG_ENV: &str = "TRUENO_EDA_CONFIG";

/// Figure size in pixels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FigureConfig {
    /// Width in pixels.
    #[serde(default = "default_width")]
    pub width: u32,

    /// Height in pixels.
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_width() -> u32 {
    1000
}
fn default_height() -> u32 {
    600
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self { width: default_width(), height: default_height() }
    }
}

/// Font registered when a context is built from configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FontConfig {
    /// Font file; none means text is only emitted in vector output.
    #[serde(default)]
    pub path: Option<PathBuf>,

    /// Family name override for vector output.
    #[serde(default)]
    pub family: Option<String>,
}

/// Terminal display settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TerminalConfig {
    /// Width in character cells.
    #[serde(default = "default_terminal_width")]
    pub width: u32,
}

fn default_terminal_width() -> u32 {
    100
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self { width: default_terminal_width() }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EdaConfig {
    /// Configuration version.
    #[serde(default = "default_version")]
    pub version: u32,

    /// Figure size.
    #[serde(default)]
    pub figure: FigureConfig,

    /// Font settings.
    #[serde(default)]
    pub font: FontConfig,

    /// Terminal sink settings.
    #[serde(default)]
    pub terminal: TerminalConfig,

    /// Rows shown by the overview report.
    #[serde(default = "default_head_rows")]
    pub head_rows: usize,
}

fn default_version() -> u32 {
    1
}
fn default_head_rows() -> usize {
    crate::report::DEFAULT_HEAD_ROWS
}

impl Default for EdaConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            figure: FigureConfig::default(),
            font: FontConfig::default(),
            terminal: TerminalConfig::default(),
            head_rows: default_head_rows(),
        }
    }
}

impl EdaConfig {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        tracing::debug!(path = %path.display(), "loading configuration");
        Self::parse(&content)
    }

    /// Parses configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] with the line number if parsing fails, or if
    /// a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self> {
        let config: Self = serde_yaml_ng::from_str(yaml).map_err(|e| {
            let line = e.location().map(|l| l.line()).unwrap_or(0);
            Error::Config { line, message: e.to_string() }
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Configuration from `TRUENO_EDA_CONFIG`, else `<config dir>/trueno-eda/config.yaml`,
    /// else defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if a file is found but cannot be loaded.
    pub fn from_env() -> Result<Self> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Self::load(path);
        }
        match dirs::config_dir().map(|d| d.join("trueno-eda").join("config.yaml")) {
            Some(path) if path.is_file() => Self::load(path),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.figure.width == 0 || self.figure.height == 0 {
            return Err(Error::Config {
                line: 0,
                message: format!(
                    "figure dimensions must be positive, got {}x{}",
                    self.figure.width, self.figure.height
                ),
            });
        }
        if self.head_rows == 0 {
            return Err(Error::Config { line: 0, message: "head_rows must be positive".to_string() });
        }
        Ok(())
    }
}
