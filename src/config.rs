//! Run parameters.
//!
//! An [`EtlConfig`] starts from defaults, can be loaded from a TOML file, and is then overridden
//! field by field by the caller (the CLI applies its flags on top).
//!
//! ```toml
//! input_file = "data/movies.csv"
//! output_file = "out/movie_enhanced.csv"
//! summary_file = "out/summary.json"
//! event_log = "out/etl.log"
//! ```

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{EtlError, EtlResult};

/// Default input path.
pub const DEFAULT_INPUT_FILE: &str = "movies.csv";
/// Default output path.
pub const DEFAULT_OUTPUT_FILE: &str = "movie_enhanced.csv";

/// Paths used by one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtlConfig {
    /// CSV to read.
    pub input_file: PathBuf,
    /// Enhanced CSV to write.
    pub output_file: PathBuf,
    /// Optional JSON run summary.
    pub summary_file: Option<PathBuf>,
    /// Optional append-only event log.
    pub event_log: Option<PathBuf>,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            input_file: PathBuf::from(DEFAULT_INPUT_FILE),
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            summary_file: None,
            event_log: None,
        }
    }
}

impl EtlConfig {
    /// Parse a config from TOML text. Missing keys keep their defaults.
    ///
    /// Path consistency is not checked here; call [`EtlConfig::validate`] once every override has
    /// been applied.
    pub fn from_toml_str(text: &str) -> EtlResult<Self> {
        toml::from_str(text).map_err(|e| EtlError::Config {
            message: e.to_string(),
        })
    }

    /// Read and parse a TOML config file.
    pub fn from_toml_path(path: impl AsRef<Path>) -> EtlResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| match e {
            EtlError::Config { message } => EtlError::Config {
                message: format!("{}: {message}", path.display()),
            },
            other => other,
        })
    }

    /// Reject configs that would make the run clobber its own input.
    pub fn validate(&self) -> EtlResult<()> {
        if self.input_file.as_os_str().is_empty() || self.output_file.as_os_str().is_empty() {
            return Err(EtlError::Config {
                message: "input_file and output_file must not be empty".to_string(),
            });
        }
        if self.input_file == self.output_file {
            return Err(EtlError::Config {
                message: format!(
                    "input_file and output_file are the same path ({})",
                    self.input_file.display()
                ),
            });
        }
        Ok(())
    }
}
