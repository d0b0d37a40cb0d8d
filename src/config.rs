//! Wizard configuration loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) yields the
//! standard six-hour decision window:
//!
//! ```toml
//! decision_window_secs = 21600
//! low_time_threshold_secs = 3600
//! tick_interval_ms = 1000
//! checkpoint_every_secs = 60
//! simulated_lock_latency_ms = 1500
//!
//! [storage]
//! draft_key = "onboarding.draft"
//! locked_order_key = "onboarding.lockedOrder"
//! session_key = "onboarding.session"
//! ```

use crate::machine::DEFAULT_DECISION_WINDOW_SECS;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Storage keys for the persistence adapter.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct StorageKeys {
    pub draft_key: String,
    pub locked_order_key: String,
    pub session_key: String,
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            draft_key: "onboarding.draft".to_string(),
            locked_order_key: "onboarding.lockedOrder".to_string(),
            session_key: "onboarding.session".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WizardConfig {
    /// Length of the decision window in seconds
    pub decision_window_secs: u64,
    /// Remaining time below which the low-time warning fires
    pub low_time_threshold_secs: u64,
    /// Wall-clock length of one countdown second
    pub tick_interval_ms: u64,
    /// Save remaining time every N countdown seconds (0 disables)
    pub checkpoint_every_secs: u64,
    /// Latency of the simulated lock backend
    pub simulated_lock_latency_ms: u64,
    pub storage: StorageKeys,
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            decision_window_secs: DEFAULT_DECISION_WINDOW_SECS,
            low_time_threshold_secs: 3600,
            tick_interval_ms: 1000,
            checkpoint_every_secs: 60,
            simulated_lock_latency_ms: 1500,
            storage: StorageKeys::default(),
        }
    }
}

impl WizardConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&input)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.decision_window_secs == 0 {
            return Err(ConfigError::Invalid(
                "decision_window_secs must be greater than 0".into(),
            ));
        }
        if self.tick_interval_ms == 0 {
            return Err(ConfigError::Invalid(
                "tick_interval_ms must be greater than 0".into(),
            ));
        }
        let keys = &self.storage;
        let all = [&keys.draft_key, &keys.locked_order_key, &keys.session_key];
        if all.iter().any(|k| k.is_empty()) {
            return Err(ConfigError::Invalid("storage keys must not be empty".into()));
        }
        if keys.draft_key == keys.locked_order_key
            || keys.draft_key == keys.session_key
            || keys.locked_order_key == keys.session_key
        {
            return Err(ConfigError::Invalid("storage keys must be distinct".into()));
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn simulated_lock_latency(&self) -> Duration {
        Duration::from_millis(self.simulated_lock_latency_ms)
    }
}
