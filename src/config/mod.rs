//! Configuration types for stdin streams.
//!
//! This module provides:
//! - `StreamConfig`: Buffer capacity, poll interval and log filter for a stream
//! - `InputConfig`: Which input channel a stream binds to
//! - `ConfigError`: Validation and parse failures

mod stream;

pub use stream::{ConfigError, InputConfig, StreamConfig};
