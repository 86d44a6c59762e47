//! # lineio
//!
//! An interruptible, line-oriented console input stream for interactive
//! command processors.
//!
//! ## Overview
//!
//! lineio provides:
//! - **Line reading**: One terminator-stripped line per call into a reused, fixed-capacity buffer
//! - **Cooperative cancellation**: Stop a pending or future wait from any thread
//! - **Ordered lifecycle**: Dependencies start in order and stop in reverse, with aggregated errors
//! - **Pluggable inputs**: stdin, files, in-memory bytes, or a channel fed from another thread
//! - **Error context**: A human-readable description of the last failure
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::thread;
//! use lineio::StdinStreamBuilder;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut stream = StdinStreamBuilder::default().build()?;
//!     stream.initialize()?;
//!
//!     let interrupt = stream.interrupt_handle();
//!     ctrlc_like_hook(move || interrupt.interrupt());
//!
//!     while stream.input_available().is_ok() {
//!         match stream.read_line()? {
//!             Some(line) => dispatch(&line.to_string_lossy()),
//!             None => break,
//!         }
//!     }
//!
//!     stream.shutdown();
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - `json` - Load `StreamConfig` from JSON
//! - `yaml` - Load `StreamConfig` from YAML
//! - `toml` - Load `StreamConfig` from TOML
//! - `miette` - Pretty error reporting with miette
//! - `sarge` - Command-line argument types, needed by the `lineio_repl` binary
//!
//! ## Reading semantics
//!
//! - At most `buffer_capacity - 1` bytes are read per call. A longer line is
//!   delivered in pieces over consecutive calls.
//! - The line ends at the first `\n` or `\r`; `\r\n` is stripped as a whole
//!   because the cut happens at the `\r`.
//! - End of input is `Ok(None)` with no recorded error; an OS error is
//!   `Err(StreamError::Read)` with the OS text recorded as the last error.

pub mod buffer;
pub mod builder;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod lifecycle;
pub mod stream;

// Re-exports for convenience
pub use buffer::{Line, LineBuffer};
pub use builder::StdinStreamBuilder;
pub use config::{ConfigError, InputConfig, StreamConfig};
pub use error::{
    BoxError, ErrorContext, ErrorPolicy, LifecycleError, Phase, StreamError, SubsystemError,
};
pub use io::{
    ChannelFeeder, ChannelSource, FileInput, InMemorySource, InputHandle, InputProvider,
    Readiness, StdinInput,
};
pub use lifecycle::{FnSubsystem, Lifecycle, LogFacility, MessageCatalog, MessageId, Subsystem};
pub use stream::{InterruptHandle, StdinStream, StreamState};

// Miette re-exports
#[cfg(feature = "miette")]
pub use error::StreamDiagnostic;
