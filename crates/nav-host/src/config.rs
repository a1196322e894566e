//! Host configuration
//!
//! Loaded from TOML; every key is optional.
//!
//! ```toml
//! poll_interval_ms = 15000
//! event_capacity = 32
//!
//! [engine]
//! primary_locale = "id"
//! ```

use crate::error::ConfigError;
use nav_engine::EngineConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Host configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HostConfig {
    /// Engine settings
    pub engine: EngineConfig,
    /// Moderation queue refresh interval
    pub poll_interval_ms: u64,
    /// Buffered change events per subscriber
    pub event_capacity: usize,
}

impl HostConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With engine settings
    #[inline]
    #[must_use]
    pub fn with_engine(mut self, engine: EngineConfig) -> Self {
        self.engine = engine;
        self
    }

    /// With poll interval
    #[inline]
    #[must_use]
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    #[inline]
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Parse TOML text
    ///
    /// # Errors
    /// Returns error if the text is not valid TOML or holds unusable values
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file
    ///
    /// # Errors
    /// Returns error if the file cannot be read or parsed
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Check values serde cannot
    ///
    /// # Errors
    /// Returns error on a zero poll interval or a blank locale
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::Invalid("poll_interval_ms must be positive".into()));
        }
        if self.engine.primary_locale.trim().is_empty() {
            return Err(ConfigError::Invalid("engine.primary_locale must not be blank".into()));
        }
        if self.engine.draft_prefix.trim().is_empty() {
            return Err(ConfigError::Invalid("engine.draft_prefix must not be blank".into()));
        }
        Ok(())
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            poll_interval_ms: 30_000,
            event_capacity: 64,
        }
    }
}
