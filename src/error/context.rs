//! Last-failure description carried by a stream.

use std::fmt;

/// Human-readable description of the last failure, surfaced verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    description: Option<String>,
}

impl ErrorContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, description: impl Into<String>) {
        self.description = Some(description.into());
    }

    /// Record the `Display` text of an error.
    pub fn set_from(&mut self, err: &impl fmt::Display) {
        self.description = Some(err.to_string());
    }

    pub fn clear(&mut self) {
        self.description = None;
    }

    pub fn get(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn is_set(&self) -> bool {
        self.description.is_some()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description.as_deref().unwrap_or(""))
    }
}
