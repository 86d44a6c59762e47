//! Stream configuration.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Default capacity of the line buffer, including the terminator slot.
pub const DEFAULT_BUFFER_CAPACITY: usize = 1024;

/// Default readiness poll interval in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Default `tracing` filter directive for the log facility.
pub const DEFAULT_LOG_FILTER: &str = "warn";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("buffer capacity must be at least 2 bytes, got {0}")]
    BufferTooSmall(usize),

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,

    #[error("unknown input kind '{0}' (expected 'stdin' or 'file')")]
    UnknownInputKind(String),

    #[error("input kind 'file' requires a path")]
    MissingPath,

    #[cfg(feature = "json")]
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[cfg(feature = "yaml")]
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[cfg(feature = "toml")]
    #[error("invalid TOML config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Configuration for the input channel a stream binds to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputConfig {
    /// Kind of input: "stdin" or "file"
    pub kind: String,
    /// File path (for file inputs)
    #[serde(default)]
    pub path: Option<String>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            kind: "stdin".into(),
            path: None,
        }
    }
}

/// Configuration for a `StdinStream`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct StreamConfig {
    /// Line buffer capacity in bytes; at most `buffer_capacity - 1` bytes are read per line
    pub buffer_capacity: usize,
    /// How long each readiness wait blocks before re-checking for an interrupt
    pub poll_interval_ms: u64,
    /// Filter directive handed to the log facility
    pub log_filter: String,
    /// Input channel
    pub input: InputConfig,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            buffer_capacity: DEFAULT_BUFFER_CAPACITY,
            poll_interval_ms: DEFAULT_POLL_INTERVAL_MS,
            log_filter: DEFAULT_LOG_FILTER.into(),
            input: InputConfig::default(),
        }
    }
}

impl StreamConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.buffer_capacity = capacity;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval_ms = u64::try_from(interval.as_millis()).unwrap_or(u64::MAX);
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Check the whole configuration, input section included.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_limits()?;
        self.validate_input()
    }

    /// Check the buffer and timing values a stream cannot work with.
    pub fn validate_limits(&self) -> Result<(), ConfigError> {
        if self.buffer_capacity < 2 {
            return Err(ConfigError::BufferTooSmall(self.buffer_capacity));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::ZeroPollInterval);
        }
        Ok(())
    }

    /// Check that the input section names an input that can be opened.
    pub fn validate_input(&self) -> Result<(), ConfigError> {
        match self.input.kind.to_ascii_lowercase().as_str() {
            "stdin" | "-" => Ok(()),
            "file" if self.input.path.is_some() => Ok(()),
            "file" => Err(ConfigError::MissingPath),
            other => Err(ConfigError::UnknownInputKind(other.to_string())),
        }
    }

    #[cfg(feature = "json")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[cfg(feature = "yaml")]
    pub fn from_yaml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = serde_yaml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    #[cfg(feature = "toml")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }
}
