//! CLI integration helpers for lineio.
//!
//! This module converts command-line tokens into stream configuration.
//!
//! # Example with sarge
//!
//! ```rust,ignore
//! use lineio::cli::InputArg;
//! use sarge::prelude::*;
//!
//! let mut reader = ArgumentReader::new();
//! let input_ref = reader.add::<InputArg>(tag::both('i', "input"));
//! let args = reader.parse()?;
//! let input = input_ref.get(&args).and_then(Result::ok).unwrap_or_default();
//! let config = StreamConfig::default().with_input(input.into_config());
//! ```

use crate::config::InputConfig;

#[cfg(feature = "sarge")]
mod sarge;

/// Input channel named on the command line.
///
/// Tokens: `-` or `stdin` for standard input, `@<path>` to force a file
/// path, anything else is taken as a file path.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputArg {
    #[default]
    Stdin,
    File(String),
}

impl InputArg {
    pub fn from_token(token: &str) -> Self {
        let token = token.trim();
        if let Some(path) = token.strip_prefix('@') {
            return InputArg::File(path.to_string());
        }
        if token.is_empty() || token == "-" || token.eq_ignore_ascii_case("stdin") {
            InputArg::Stdin
        } else {
            InputArg::File(token.to_string())
        }
    }

    /// Check if reading from stdin.
    pub fn is_stdin(&self) -> bool {
        matches!(self, InputArg::Stdin)
    }

    pub fn into_config(self) -> InputConfig {
        match self {
            InputArg::Stdin => InputConfig::default(),
            InputArg::File(path) => InputConfig {
                kind: "file".into(),
                path: Some(path),
            },
        }
    }
}
