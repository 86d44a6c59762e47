//! Error types and policies for lineio.
//!
//! This module provides:
//! - `ErrorPolicy`: Controls whether subsystem bring-up fails fast or accumulates errors
//! - `Phase`: Indicates which lifecycle step a subsystem failed in
//! - `SubsystemError`: A single subsystem failure with context
//! - `LifecycleError`: A collection of subsystem failures
//! - `StreamError`: Per-call failures reported by `StdinStream`
//! - `ErrorContext`: The human-readable description of a stream's last failure

use std::fmt;
use std::io;

use thiserror::Error;

use crate::config::ConfigError;

mod context;

pub use context::ErrorContext;

/// Boxed error returned by subsystems.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop at the first error encountered
    FastFail,
    /// Collect all errors and return them together
    #[default]
    Accumulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Initialize,
    Shutdown,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Initialize => write!(f, "Initialize"),
            Phase::Shutdown => write!(f, "Shutdown"),
        }
    }
}

#[derive(Debug)]
pub struct SubsystemError {
    /// Lifecycle step that failed
    pub phase: Phase,
    /// Name of the subsystem
    pub subsystem: String,
    /// The underlying error
    pub error: BoxError,
}

impl SubsystemError {
    pub fn new(phase: Phase, subsystem: impl Into<String>, error: impl Into<BoxError>) -> Self {
        Self {
            phase,
            subsystem: subsystem.into(),
            error: error.into(),
        }
    }
}

impl fmt::Display for SubsystemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.phase, self.subsystem, self.error)
    }
}

impl std::error::Error for SubsystemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.error.as_ref())
    }
}

/// An aggregate of subsystem failures from one lifecycle pass.
#[derive(Debug, Error)]
pub struct LifecycleError {
    /// Collection of individual errors, in the order they occurred
    pub errors: Vec<SubsystemError>,
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} subsystem error(s)", self.errors.len())?;
        for e in &self.errors {
            write!(f, "; {}", e)?;
        }
        Ok(())
    }
}

impl LifecycleError {
    /// Create a new aggregate error with a single error.
    pub fn single(error: SubsystemError) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// The first failure recorded in this pass.
    pub fn first(&self) -> Option<&SubsystemError> {
        self.errors.first()
    }

    /// Check if there are no errors.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get the number of errors.
    pub fn len(&self) -> usize {
        self.errors.len()
    }
}

impl From<SubsystemError> for LifecycleError {
    fn from(error: SubsystemError) -> Self {
        Self::single(error)
    }
}

/// Failures reported by `StdinStream` operations.
#[derive(Debug, Error)]
pub enum StreamError {
    /// A dependency failed to start; `message` embeds the first failure.
    #[error("{message}")]
    Init {
        message: String,
        #[source]
        source: LifecycleError,
    },

    /// The input channel could not be bound; `message` names the input.
    #[error("{message}")]
    Open {
        message: String,
        #[source]
        source: io::Error,
    },

    #[error("stdin stream is not initialized")]
    NotInitialized,

    /// The stream was told to stop waiting. Not a true error.
    #[error("stdin stream was interrupted")]
    Interrupted,

    /// The readiness wait reported an error distinct from a timeout.
    #[error("waiting for input failed: {0}")]
    Wait(#[source] io::Error),

    /// An OS-level error occurred during the blocking read.
    #[error("{0}")]
    Read(#[source] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl StreamError {
    /// True when this is the expected result of an interrupt.
    pub fn is_interrupted(&self) -> bool {
        matches!(self, StreamError::Interrupted)
    }
}

#[cfg(feature = "miette")]
mod miette_impl;

#[cfg(feature = "miette")]
pub use miette_impl::*;
