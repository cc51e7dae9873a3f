//! Global configuration parsing and validation.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::{AppError, Result};

/// Environment variable that overrides [`GlobalConfig::state_path`].
pub const STATE_PATH_ENV: &str = "STATEFUL_CALC_STATE_PATH";

/// Backend used for the durable slot.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum StorageBackend {
    /// Single file replaced atomically on every checkpoint.
    #[default]
    File,
    /// Process-local blob; state does not survive the process.
    Memory,
}

fn default_state_path() -> PathBuf {
    PathBuf::from(".stateful-calc").join("state.json")
}

fn default_max_count() -> u32 {
    1_000_000
}

fn default_log_filter() -> String {
    "info".into()
}

/// Global configuration parsed from `config.toml`.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct GlobalConfig {
    /// Location of the state file used by the file backend.
    #[serde(default = "default_state_path")]
    pub state_path: PathBuf,
    /// Durable slot backend.
    #[serde(default)]
    pub storage: StorageBackend,
    /// Upper bound on the element count of `median` and `random-sequence`.
    #[serde(default = "default_max_count")]
    pub max_count: u32,
    /// Default tracing filter when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            state_path: default_state_path(),
            storage: StorageBackend::default(),
            max_count: default_max_count(),
            log_filter: default_log_filter(),
        }
    }
}

impl GlobalConfig {
    /// Load and validate configuration from a TOML file path.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if the file cannot be read or contains
    /// invalid TOML, or if validation fails.
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .map_err(|err| AppError::Config(format!("failed to read config: {err}")))?;
        Self::from_toml_str(&raw)
    }

    /// Parse configuration from a TOML string and validate it.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if parsing or validation fails.
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace `state_path` with the value of [`STATE_PATH_ENV`] when set.
    ///
    /// Empty values are ignored.
    pub fn apply_env_overrides(&mut self) {
        if let Some(value) = env::var(STATE_PATH_ENV)
            .ok()
            .filter(|value| !value.trim().is_empty())
        {
            self.state_path = PathBuf::from(value);
        }
    }

    /// Path of the file backing the durable slot.
    #[must_use]
    pub fn state_path(&self) -> &Path {
        &self.state_path
    }

    fn validate(&self) -> Result<()> {
        if self.max_count == 0 {
            return Err(AppError::Config(
                "max_count must be greater than zero".into(),
            ));
        }

        if self.state_path.as_os_str().is_empty() {
            return Err(AppError::Config("state_path must not be empty".into()));
        }

        if self.log_filter.trim().is_empty() {
            return Err(AppError::Config("log_filter must not be empty".into()));
        }

        Ok(())
    }
}
