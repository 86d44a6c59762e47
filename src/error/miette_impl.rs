//! Miette integration for pretty error reporting.

use miette::{Diagnostic, Severity};
use thiserror::Error;

use super::{LifecycleError, StreamError, SubsystemError};

/// A diagnostic wrapper for stream errors compatible with miette.
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct StreamDiagnostic {
    /// The error message
    pub message: String,

    #[source]
    /// The underlying error source
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,

    #[help]
    /// Help text for the user
    pub help: Option<String>,

    #[diagnostic(severity)]
    /// Severity level
    pub severity: Severity,
}

impl From<SubsystemError> for StreamDiagnostic {
    fn from(e: SubsystemError) -> Self {
        StreamDiagnostic {
            message: format!("[{}] subsystem '{}' failed", e.phase, e.subsystem),
            source: Some(e.error),
            help: Some("Check the subsystem registration order and its configuration".into()),
            severity: Severity::Error,
        }
    }
}

impl From<LifecycleError> for StreamDiagnostic {
    fn from(agg: LifecycleError) -> Self {
        let first = agg.errors.into_iter().next();
        if let Some(e) = first {
            StreamDiagnostic::from(e)
        } else {
            StreamDiagnostic {
                message: "Unknown lifecycle error".into(),
                source: None,
                help: None,
                severity: Severity::Error,
            }
        }
    }
}

impl From<StreamError> for StreamDiagnostic {
    fn from(e: StreamError) -> Self {
        let (help, severity) = match &e {
            StreamError::Init { .. } => (
                Some("A dependency of the stdin stream failed to start".to_string()),
                Severity::Error,
            ),
            StreamError::Open { .. } => (
                Some("Check that the configured input exists and is readable".to_string()),
                Severity::Error,
            ),
            StreamError::NotInitialized => (
                Some("Call `initialize` before reading".to_string()),
                Severity::Error,
            ),
            StreamError::Interrupted => (None, Severity::Advice),
            StreamError::Wait(_) | StreamError::Read(_) => (
                Some("The standard input handle reported an OS error".to_string()),
                Severity::Error,
            ),
            StreamError::Config(_) => (
                Some("Check the stream configuration values".to_string()),
                Severity::Error,
            ),
        };
        StreamDiagnostic {
            message: e.to_string(),
            source: Some(Box::new(e)),
            help,
            severity,
        }
    }
}

impl From<StreamError> for miette::Report {
    fn from(e: StreamError) -> Self {
        miette::Report::new(StreamDiagnostic::from(e))
    }
}
