//! Standard I/O implementations for stdin and files.

use std::fs::File;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use super::{InputHandle, InputProvider, Readiness};

/// Input provider for reading from the process's standard input.
#[derive(Debug, Clone)]
pub struct StdinInput {
    id: String,
}

impl StdinInput {
    /// Create a new stdin input provider.
    pub fn new() -> Self {
        Self { id: "-".into() }
    }
}

impl Default for StdinInput {
    fn default() -> Self {
        Self::new()
    }
}

impl InputProvider for StdinInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn InputHandle>> {
        Ok(Box::new(platform::StdinHandle::new()))
    }
}

#[cfg(unix)]
pub(crate) use platform::poll_readable;

#[cfg(unix)]
mod platform {
    use std::io::{self, Read};
    use std::os::fd::RawFd;
    use std::time::Duration;

    use crate::io::{InputHandle, Readiness};

    /// Unbuffered handle on fd 0.
    ///
    /// Reads go straight to `read(2)` so nothing is hidden in a library
    /// buffer where `poll(2)` cannot see it.
    #[derive(Debug)]
    pub(super) struct StdinHandle {
        fd: RawFd,
    }

    impl StdinHandle {
        pub(super) fn new() -> Self {
            Self {
                fd: libc::STDIN_FILENO,
            }
        }
    }

    impl Read for StdinHandle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            // SAFETY: `buf` is valid for writes of `buf.len()` bytes.
            let n = unsafe { libc::read(self.fd, buf.as_mut_ptr().cast(), buf.len()) };
            if n < 0 {
                Err(io::Error::last_os_error())
            } else {
                Ok(n as usize)
            }
        }
    }

    impl InputHandle for StdinHandle {
        fn wait_readable(&mut self, timeout: Duration) -> io::Result<Readiness> {
            poll_readable(self.fd, timeout)
        }
    }

    pub(crate) fn poll_readable(fd: RawFd, timeout: Duration) -> io::Result<Readiness> {
        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let millis = timeout.as_millis().min(libc::c_int::MAX as u128) as libc::c_int;

        // SAFETY: `pfd` is a single valid pollfd for the duration of the call.
        let ret = unsafe { libc::poll(&mut pfd, 1, millis) };
        match ret {
            0 => Ok(Readiness::TimedOut),
            n if n > 0 => {
                if pfd.revents & libc::POLLNVAL != 0 {
                    Err(io::Error::from_raw_os_error(libc::EBADF))
                } else {
                    // POLLIN, POLLHUP and POLLERR all mean a read will not block.
                    Ok(Readiness::Ready)
                }
            }
            _ => {
                let err = io::Error::last_os_error();
                if err.kind() == io::ErrorKind::Interrupted {
                    Ok(Readiness::TimedOut)
                } else {
                    Err(err)
                }
            }
        }
    }
}

#[cfg(not(unix))]
mod platform {
    use std::io::{self, Read};
    use std::time::Duration;

    use crate::io::{InputHandle, Readiness};

    /// Stdin handle for targets without a readiness primitive.
    ///
    /// Reads work; waits report `Unsupported`, so callers fall back to
    /// calling `read_line` directly.
    #[derive(Debug)]
    pub(super) struct StdinHandle {
        stdin: io::Stdin,
    }

    impl StdinHandle {
        pub(super) fn new() -> Self {
            Self { stdin: io::stdin() }
        }
    }

    impl Read for StdinHandle {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.stdin.read(buf)
        }
    }

    impl InputHandle for StdinHandle {
        fn wait_readable(&mut self, _timeout: Duration) -> io::Result<Readiness> {
            Err(io::Error::new(
                io::ErrorKind::Unsupported,
                "waiting on stdin is not supported on this platform",
            ))
        }
    }
}

/// Input provider for reading from files.
#[derive(Debug, Clone)]
pub struct FileInput {
    id: String,
    path: PathBuf,
}

impl FileInput {
    /// Create a new file input provider.
    pub fn new(path: PathBuf) -> Self {
        let id = path.to_string_lossy().into_owned();
        Self { id, path }
    }

    /// Get the file path.
    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl InputProvider for FileInput {
    fn id(&self) -> &str {
        &self.id
    }

    fn open(&self) -> io::Result<Box<dyn InputHandle>> {
        let file = File::open(&self.path)?;
        Ok(Box::new(FileHandle { file }))
    }
}

#[derive(Debug)]
struct FileHandle {
    file: File,
}

impl Read for FileHandle {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.file.read(buf)
    }
}

impl InputHandle for FileHandle {
    #[cfg(unix)]
    fn wait_readable(&mut self, timeout: Duration) -> io::Result<Readiness> {
        use std::os::fd::AsRawFd;

        // Regular files report ready at once; FIFOs opened by path really wait.
        poll_readable(self.file.as_raw_fd(), timeout)
    }

    #[cfg(not(unix))]
    fn wait_readable(&mut self, _timeout: Duration) -> io::Result<Readiness> {
        Ok(Readiness::Ready)
    }
}
