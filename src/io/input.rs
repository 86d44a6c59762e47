//! Input provider and handle trait definitions.

use std::fmt::Debug;
use std::io::{self, Read};
use std::time::Duration;

/// Outcome of a bounded readiness wait.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    /// A read will not block: data, end of input, or a pending error.
    Ready,
    /// Nothing happened before the timeout elapsed.
    TimedOut,
}

/// An opened input channel.
///
/// Besides plain reads, a handle can wait for readability with a timeout so
/// the caller gets a chance to re-check for cancellation between waits.
pub trait InputHandle: Read + Send {
    /// Block for at most `timeout` until a read would not block.
    ///
    /// A wait cut short by a signal reports `TimedOut`; only real failures of
    /// the wait primitive are returned as errors.
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<Readiness>;
}

/// Trait for input providers.
///
/// Implementors provide a way to open a waitable, readable handle from
/// sources such as stdin, files, or in-memory buffers.
pub trait InputProvider: Send + Sync + Debug {
    /// Returns a unique identifier for this input source.
    ///
    /// This is used for error messages and logging.
    /// Convention: "-" for stdin, file path for files.
    fn id(&self) -> &str;

    /// Open and return a new handle.
    fn open(&self) -> io::Result<Box<dyn InputHandle>>;
}
