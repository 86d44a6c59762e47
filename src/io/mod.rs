//! Input channel abstractions.
//!
//! This module provides:
//! - `InputProvider`: Trait for input sources a stream can bind to
//! - `InputHandle`: An opened source, readable and waitable with a timeout
//! - Standard implementations for stdin and files
//! - In-memory and channel-fed implementations for testing and embedding

mod input;
mod memory;
mod std_io;

pub use input::{InputHandle, InputProvider, Readiness};
pub use memory::{ChannelFeeder, ChannelSource, InMemorySource};
pub use std_io::{FileInput, StdinInput};

#[cfg(all(unix, test))]
pub(crate) use std_io::poll_readable;
