//! Fixed-capacity landing zone for one line of input.

use std::borrow::Cow;
use std::io::{self, BufRead};
use std::str::Utf8Error;

/// Owned byte buffer that receives one line at a time.
///
/// The backing allocation is made once and reused: every fill clears the
/// previous contents, so no bytes from an earlier line survive into the next.
#[derive(Debug)]
pub struct LineBuffer {
    bytes: Vec<u8>,
    capacity: usize,
}

impl LineBuffer {
    /// Allocate a buffer holding at most `capacity - 1` bytes of text.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Capacity including the terminator slot.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Largest number of bytes a single fill will read.
    pub fn max_line_len(&self) -> usize {
        self.capacity.saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Read one line from `reader`, replacing the current contents.
    ///
    /// Stops after a `\n`, at end of input, or once `max_line_len` bytes are
    /// held; anything past that boundary stays in the reader for the next
    /// fill. Returns the number of bytes read, `0` meaning end of input.
    /// `Interrupted` errors from the reader are retried.
    pub fn fill_from<R: BufRead + ?Sized>(&mut self, reader: &mut R) -> io::Result<usize> {
        self.bytes.clear();
        let limit = self.max_line_len();

        while self.bytes.len() < limit {
            let available = match reader.fill_buf() {
                Ok(chunk) => chunk,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            };
            if available.is_empty() {
                break;
            }

            let room = limit - self.bytes.len();
            let window = &available[..available.len().min(room)];
            let (take, done) = match window.iter().position(|&b| b == b'\n') {
                Some(i) => (i + 1, true),
                None => (window.len(), false),
            };

            self.bytes.extend_from_slice(&window[..take]);
            reader.consume(take);
            if done {
                break;
            }
        }

        Ok(self.bytes.len())
    }

    /// Cut the contents at the first `\n` or `\r`, in place.
    pub fn strip_terminator(&mut self) {
        if let Some(i) = self.bytes.iter().position(|&b| b == b'\n' || b == b'\r') {
            self.bytes.truncate(i);
        }
    }

    /// Borrow the current contents as a line view.
    pub fn line(&self) -> Line<'_> {
        Line { bytes: &self.bytes }
    }
}

/// A terminator-stripped line borrowed from a stream's buffer.
///
/// The view is only valid until the next read or shutdown of the stream
/// that produced it; copy it with [`Line::to_vec`] or [`Line::to_string_lossy`]
/// to keep it longer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    bytes: &'a [u8],
}

impl<'a> Line<'a> {
    pub fn as_bytes(&self) -> &'a [u8] {
        self.bytes
    }

    /// The line as UTF-8, if it is valid UTF-8.
    pub fn to_str(&self) -> Result<&'a str, Utf8Error> {
        std::str::from_utf8(self.bytes)
    }

    pub fn to_string_lossy(&self) -> Cow<'a, str> {
        String::from_utf8_lossy(self.bytes)
    }

    pub fn to_vec(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl AsRef<[u8]> for Line<'_> {
    fn as_ref(&self) -> &[u8] {
        self.bytes
    }
}

impl PartialEq<&str> for Line<'_> {
    fn eq(&self, other: &&str) -> bool {
        self.bytes == other.as_bytes()
    }
}
