//! Interruptible line-oriented input stream.
//!
//! A [`StdinStream`] is driven by two kinds of callers:
//!
//! - one reader, owning `&mut StdinStream`, which alternates
//!   [`StdinStream::input_available`] and [`StdinStream::read_line`];
//! - any number of controllers holding an [`InterruptHandle`], which may
//!   stop the reader's waiting at any time from another thread.
//!
//! Cancellation is cooperative. `input_available` waits in bounded slices of
//! the configured poll interval and re-checks the interrupt flag between
//! slices, so an interrupt is observed within one interval. A `read_line`
//! that has already entered the OS read cannot be cancelled and returns only
//! once input arrives; readers that must stay interruptible call
//! `input_available` first.
//!
//! Interruption is level-triggered and permanent: a stream never waits again
//! after its flag has been cleared, including across re-initialization.
//!
//! Shutdown parks the bound input rather than closing it, so a restarted
//! stream continues where it stopped and input read ahead but not yet
//! returned as lines is not lost.

use std::io::BufReader;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::{debug, trace, warn};

use crate::buffer::{Line, LineBuffer};
use crate::config::StreamConfig;
use crate::error::{ErrorContext, ErrorPolicy, StreamError};
use crate::io::{InputHandle, InputProvider, Readiness};
use crate::lifecycle::{Lifecycle, MessageCatalog, MessageId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Uninitialized,
    Ready,
    Shutdown,
}

/// Cloneable, thread-safe handle that stops a stream from waiting for input.
#[derive(Debug, Clone)]
pub struct InterruptHandle {
    waiting: Arc<AtomicBool>,
}

impl InterruptHandle {
    fn new() -> Self {
        Self {
            waiting: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Stop current and future waits. Never blocks.
    pub fn interrupt(&self) {
        self.waiting.store(false, Ordering::Release);
    }

    pub fn is_interrupted(&self) -> bool {
        !self.waiting.load(Ordering::Acquire)
    }
}

/// Line reader over an input channel, with ordered dependency lifecycle.
pub struct StdinStream {
    config: StreamConfig,
    provider: Arc<dyn InputProvider>,
    lifecycle: Lifecycle,
    messages: MessageCatalog,
    state: StreamState,
    buffer: Option<LineBuffer>,
    reader: Option<BufReader<Box<dyn InputHandle>>>,
    parked: Option<BufReader<Box<dyn InputHandle>>>,
    interrupt: InterruptHandle,
    error: ErrorContext,
}

impl std::fmt::Debug for StdinStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StdinStream")
            .field("input", &self.provider.id())
            .field("state", &self.state)
            .field("interrupted", &self.interrupt.is_interrupted())
            .field("lifecycle", &self.lifecycle.names())
            .field("last_error", &self.error.get())
            .finish_non_exhaustive()
    }
}

impl StdinStream {
    /// Create an uninitialized stream.
    ///
    /// `lifecycle` holds the dependencies started by [`initialize`](Self::initialize),
    /// most foundational first. `messages` supplies the text of error
    /// descriptions and is usually registered in `lifecycle` as well.
    pub fn new(
        config: StreamConfig,
        provider: Arc<dyn InputProvider>,
        lifecycle: Lifecycle,
        messages: MessageCatalog,
    ) -> Self {
        Self {
            config,
            provider,
            lifecycle,
            messages,
            state: StreamState::Uninitialized,
            buffer: None,
            reader: None,
            parked: None,
            interrupt: InterruptHandle::new(),
            error: ErrorContext::new(),
        }
    }

    /// Start dependencies, allocate the line buffer and bind the input.
    ///
    /// The input is opened on first use; after a shutdown the parked input
    /// is resumed instead. Succeeds at once if the stream is already ready.
    /// On failure the dependencies that did start are stopped again, the
    /// state is left unchanged and the failure is described by
    /// [`last_error`](Self::last_error).
    pub fn initialize(&mut self) -> Result<(), StreamError> {
        if self.state == StreamState::Ready {
            return Ok(());
        }

        if let Err(e) = self.config.validate_limits() {
            let message = self.messages.format(MessageId::InvalidConfig, &e.to_string());
            warn!(%message, "stdin stream configuration rejected");
            self.error.set(message);
            return Err(e.into());
        }

        if let Err(source) = self.lifecycle.initialize(ErrorPolicy::FastFail) {
            let detail = source.first().map(ToString::to_string).unwrap_or_default();
            let message = self.messages.format(MessageId::InitStdinHandler, &detail);
            self.roll_back();
            warn!(%message, "stdin stream failed to initialize");
            self.error.set(message.clone());
            return Err(StreamError::Init { message, source });
        }

        let reader = match self.parked.take() {
            Some(reader) => reader,
            None => match self.provider.open() {
                Ok(handle) => BufReader::new(handle),
                Err(source) => {
                    let detail = format!("{}: {source}", self.provider.id());
                    let message = self.messages.format(MessageId::OpenInput, &detail);
                    self.roll_back();
                    warn!(%message, "stdin stream failed to initialize");
                    self.error.set(message.clone());
                    return Err(StreamError::Open { message, source });
                }
            },
        };

        self.buffer = Some(LineBuffer::with_capacity(self.config.buffer_capacity));
        self.reader = Some(reader);
        self.error.clear();
        self.state = StreamState::Ready;
        debug!(
            input = %self.provider.id(),
            capacity = self.config.buffer_capacity,
            poll_interval_ms = self.config.poll_interval_ms,
            "stdin stream ready"
        );
        Ok(())
    }

    fn roll_back(&mut self) {
        if let Err(e) = self.lifecycle.shutdown() {
            warn!(error = %e, "rolling back stdin stream dependencies failed");
        }
    }

    /// Release the buffer, park the input, then stop dependencies in reverse
    /// order.
    ///
    /// A no-op unless the stream is ready. Never fails: a dependency that
    /// fails to stop is reported through [`last_error`](Self::last_error).
    pub fn shutdown(&mut self) {
        if self.state != StreamState::Ready {
            return;
        }

        self.state = StreamState::Shutdown;
        self.error.clear();
        self.buffer = None;
        self.parked = self.reader.take();

        if let Err(e) = self.lifecycle.shutdown() {
            let message = self
                .messages
                .format(MessageId::ShutdownStdinHandler, &e.to_string());
            warn!(%message, "stdin stream shut down with errors");
            self.error.set(message);
        } else {
            debug!(input = %self.provider.id(), "stdin stream shut down");
        }
    }

    /// Wait until a line can be read without blocking.
    ///
    /// Returns `Ok(())` when input (or end of input) is ready,
    /// `Err(StreamError::Interrupted)` once the stream has been interrupted,
    /// and `Err(StreamError::Wait)` if the wait itself fails. Bytes already
    /// buffered from an earlier read count as ready.
    pub fn input_available(&mut self) -> Result<(), StreamError> {
        let interval = self.config.poll_interval();
        let reader = self.reader.as_mut().ok_or(StreamError::NotInitialized)?;

        if self.interrupt.is_interrupted() {
            trace!("input wait skipped: stream interrupted");
            return Err(StreamError::Interrupted);
        }
        if !reader.buffer().is_empty() {
            return Ok(());
        }

        while !self.interrupt.is_interrupted() {
            match reader.get_mut().wait_readable(interval) {
                Ok(Readiness::TimedOut) => continue,
                Ok(Readiness::Ready) => return Ok(()),
                Err(e) => {
                    let err = StreamError::Wait(e);
                    warn!(error = %err, "stdin wait failed");
                    self.error.set_from(&err);
                    return Err(err);
                }
            }
        }

        debug!("input wait interrupted");
        Err(StreamError::Interrupted)
    }

    /// Read one line, blocking until it arrives.
    ///
    /// Returns the line with its terminator (the first `\n` or `\r`) cut
    /// off, `Ok(None)` at a clean end of input (no error is recorded), or
    /// `Err(StreamError::Read)` on an OS error (recorded in
    /// [`last_error`](Self::last_error)). Lines longer than the buffer are
    /// delivered in buffer-sized pieces.
    ///
    /// The returned view borrows the stream's buffer and must be copied to
    /// outlive the next call.
    pub fn read_line(&mut self) -> Result<Option<Line<'_>>, StreamError> {
        self.error.clear();

        let (Some(reader), Some(buffer)) = (self.reader.as_mut(), self.buffer.as_mut()) else {
            return Err(StreamError::NotInitialized);
        };

        match buffer.fill_from(reader) {
            Ok(0) => {
                debug!(input = %self.provider.id(), "end of input");
                Ok(None)
            }
            Ok(n) => {
                buffer.strip_terminator();
                trace!(bytes = n, "line read");
                Ok(Some(buffer.line()))
            }
            Err(e) => {
                let err = StreamError::Read(e);
                warn!(error = %err, "stdin read failed");
                self.error.set_from(&err);
                Err(err)
            }
        }
    }

    /// Stop current and future waits of this stream.
    pub fn interrupt_read_line(&self) {
        self.interrupt.interrupt();
    }

    /// Handle for interrupting this stream from other threads.
    pub fn interrupt_handle(&self) -> InterruptHandle {
        self.interrupt.clone()
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupt.is_interrupted()
    }

    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Description of the last failure, if any.
    pub fn last_error(&self) -> Option<&str> {
        self.error.get()
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn input_id(&self) -> &str {
        self.provider.id()
    }

    pub fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }
}

impl Drop for StdinStream {
    fn drop(&mut self) {
        self.shutdown();
    }
}
