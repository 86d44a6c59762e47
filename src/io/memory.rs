//! In-memory input implementations for testing and embedding.

use std::io::{self, Cursor, Read};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::{InputHandle, InputProvider, Readiness};

/// In-memory input source; always ready.
#[derive(Debug, Clone)]
pub struct InMemorySource {
    id: String,
    data: Arc<Vec<u8>>,
}

impl InMemorySource {
    /// Create a new in-memory source with the given data.
    pub fn new(id: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            id: id.into(),
            data: Arc::new(data),
        }
    }

    /// Create a new in-memory source from a string.
    pub fn from_string(id: impl Into<String>, data: impl Into<String>) -> Self {
        Self::new(id, data.into().into_bytes())
    }
}

impl InputProvider for InMemorySource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn InputHandle>> {
        Ok(Box::new(InMemoryHandle {
            cursor: Cursor::new(self.data.as_ref().clone()),
        }))
    }
}

struct InMemoryHandle {
    cursor: Cursor<Vec<u8>>,
}

impl Read for InMemoryHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl InputHandle for InMemoryHandle {
    fn wait_readable(&mut self, _timeout: Duration) -> io::Result<Readiness> {
        Ok(Readiness::Ready)
    }
}

/// Input source fed chunk by chunk from another thread.
///
/// Input stays pending until a [`ChannelFeeder`] sends bytes, which makes
/// readiness waits really block. Dropping every feeder ends the input.
#[derive(Debug, Clone)]
pub struct ChannelSource {
    id: String,
    rx: Arc<Mutex<Receiver<Vec<u8>>>>,
}

/// Sending half of a [`ChannelSource`].
#[derive(Debug, Clone)]
pub struct ChannelFeeder {
    tx: Sender<Vec<u8>>,
}

impl ChannelSource {
    /// Create a source and the feeder that supplies it.
    pub fn new(id: impl Into<String>) -> (Self, ChannelFeeder) {
        let (tx, rx) = mpsc::channel();
        let source = Self {
            id: id.into(),
            rx: Arc::new(Mutex::new(rx)),
        };
        (source, ChannelFeeder { tx })
    }
}

impl ChannelFeeder {
    /// Send raw bytes. Returns `false` once the source is gone.
    pub fn send(&self, bytes: impl Into<Vec<u8>>) -> bool {
        self.tx.send(bytes.into()).is_ok()
    }
}

impl InputProvider for ChannelSource {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn InputHandle>> {
        Ok(Box::new(ChannelHandle {
            rx: self.rx.clone(),
            pending: Cursor::new(Vec::new()),
            closed: false,
        }))
    }
}

struct ChannelHandle {
    rx: Arc<Mutex<Receiver<Vec<u8>>>>,
    pending: Cursor<Vec<u8>>,
    closed: bool,
}

impl ChannelHandle {
    fn has_pending(&self) -> bool {
        (self.pending.position() as usize) < self.pending.get_ref().len()
    }

    fn lock_rx(&self) -> io::Result<std::sync::MutexGuard<'_, Receiver<Vec<u8>>>> {
        self.rx
            .lock()
            .map_err(|_| io::Error::other("input channel lock poisoned"))
    }
}

impl Read for ChannelHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        while !self.has_pending() && !self.closed {
            let next = self.lock_rx()?.recv();
            match next {
                Ok(chunk) => self.pending = Cursor::new(chunk),
                Err(_) => self.closed = true,
            }
        }
        self.pending.read(buf)
    }
}

impl InputHandle for ChannelHandle {
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<Readiness> {
        if self.has_pending() || self.closed {
            return Ok(Readiness::Ready);
        }

        let next = self.lock_rx()?.recv_timeout(timeout);
        match next {
            Ok(chunk) if chunk.is_empty() => Ok(Readiness::TimedOut),
            Ok(chunk) => {
                self.pending = Cursor::new(chunk);
                Ok(Readiness::Ready)
            }
            Err(RecvTimeoutError::Timeout) => Ok(Readiness::TimedOut),
            Err(RecvTimeoutError::Disconnected) => {
                self.closed = true;
                Ok(Readiness::Ready)
            }
        }
    }
}
