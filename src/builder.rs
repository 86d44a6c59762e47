//! Builder for creating StdinStream instances.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{ConfigError, StreamConfig};
use crate::error::StreamError;
use crate::io::{FileInput, InputProvider, StdinInput};
use crate::lifecycle::{Lifecycle, LogFacility, MessageCatalog, Subsystem};
use crate::stream::StdinStream;

pub struct StdinStreamBuilder {
    config: StreamConfig,
    provider: Option<Arc<dyn InputProvider>>,
    messages: MessageCatalog,
    lifecycle: Option<Lifecycle>,
    extra_subsystems: Vec<Box<dyn Subsystem>>,
}

impl StdinStreamBuilder {
    pub fn new() -> Self {
        Self {
            config: StreamConfig::default(),
            provider: None,
            messages: MessageCatalog::new(),
            lifecycle: None,
            extra_subsystems: Vec::new(),
        }
    }

    pub fn from_config(config: StreamConfig) -> Self {
        Self::new().with_config(config)
    }

    pub fn with_config(mut self, config: StreamConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_buffer_capacity(mut self, capacity: usize) -> Self {
        self.config.buffer_capacity = capacity;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.config = self.config.with_poll_interval(interval);
        self
    }

    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.config.log_filter = filter.into();
        self
    }

    /// Read from `provider` instead of the input named in the config.
    pub fn with_provider(mut self, provider: Arc<dyn InputProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_messages(mut self, messages: MessageCatalog) -> Self {
        self.messages = messages;
        self
    }

    /// Replace the default dependencies (log facility, then message catalog).
    pub fn with_lifecycle(mut self, lifecycle: Lifecycle) -> Self {
        self.lifecycle = Some(lifecycle);
        self
    }

    /// Register an extra dependency, started after the others.
    pub fn with_subsystem(mut self, subsystem: impl Subsystem + 'static) -> Self {
        self.extra_subsystems.push(Box::new(subsystem));
        self
    }

    pub fn build(self) -> Result<StdinStream, StreamError> {
        self.config.validate_limits()?;

        // The input section only matters when no provider was given.
        let provider = match self.provider {
            Some(provider) => provider,
            None => {
                self.config.validate_input()?;
                resolve_provider(&self.config)?
            }
        };

        let mut lifecycle = self.lifecycle.unwrap_or_else(|| {
            Lifecycle::new()
                .with(LogFacility::new(self.config.log_filter.clone()))
                .with(self.messages.clone())
        });
        for subsystem in self.extra_subsystems {
            lifecycle.register(subsystem);
        }

        Ok(StdinStream::new(
            self.config,
            provider,
            lifecycle,
            self.messages,
        ))
    }
}

impl Default for StdinStreamBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve_provider(config: &StreamConfig) -> Result<Arc<dyn InputProvider>, ConfigError> {
    match config.input.kind.to_ascii_lowercase().as_str() {
        "stdin" | "-" => Ok(Arc::new(StdinInput::new())),
        "file" => {
            let path = config.input.path.as_ref().ok_or(ConfigError::MissingPath)?;
            Ok(Arc::new(FileInput::new(PathBuf::from(path))))
        }
        other => Err(ConfigError::UnknownInputKind(other.to_string())),
    }
}
