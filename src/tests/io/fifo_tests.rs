//! Readiness waits on a real file descriptor, through a named pipe.

use std::ffi::CString;
use std::fs::{File, OpenOptions};
use std::io::{Read, Write};
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::StdinStreamBuilder;
use crate::io::{FileInput, InputHandle, InputProvider, Readiness, poll_readable};

fn make_fifo(dir: &Path) -> PathBuf {
    let path = dir.join("console.fifo");
    let c_path = CString::new(path.as_os_str().as_bytes()).unwrap();
    // SAFETY: `c_path` is a valid NUL-terminated path.
    let rc = unsafe { libc::mkfifo(c_path.as_ptr(), 0o600) };
    assert_eq!(rc, 0, "mkfifo: {}", std::io::Error::last_os_error());
    path
}

/// Opening one end of a FIFO blocks until the other end is opened, so the
/// writer is opened on its own thread.
fn open_pair(path: &Path) -> (Box<dyn InputHandle>, File) {
    let writer_path = path.to_path_buf();
    let writer = thread::spawn(move || OpenOptions::new().write(true).open(writer_path).unwrap());
    let reader = FileInput::new(path.to_path_buf()).open().unwrap();
    (reader, writer.join().unwrap())
}

#[test]
fn empty_fifo_times_out_then_reports_ready() {
    let dir = tempfile::tempdir().unwrap();
    let path = make_fifo(dir.path());
    let (mut reader, mut writer) = open_pair(&path);

    let start = Instant::now();
    assert_eq!(
        reader.wait_readable(Duration::from_millis(50)).unwrap(),
        Readiness::TimedOut
    );
    assert!(start.elapsed() >= Duration::from_millis(40));

    writer.write_all(b"ping\n").unwrap();
    assert_eq!(
        reader.wait_readable(Duration::from_secs(5)).unwrap(),
        Readiness::Ready
    );
    let mut buf = [0u8; 5];
    reader.read_exact(&mut buf).unwrap();
    assert_eq!(&buf, b"ping\n");
}

#[test]
fn closed_writer_reports_ready_for_end_of_input() {
    let dir = tempfile::tempdir().unwrap();
    let path = make_fifo(dir.path());
    let (mut reader, writer) = open_pair(&path);
    drop(writer);

    assert_eq!(
        reader.wait_readable(Duration::from_secs(5)).unwrap(),
        Readiness::Ready
    );
    let mut buf = [0u8; 8];
    assert_eq!(reader.read(&mut buf).unwrap(), 0);
}

#[test]
fn unopened_descriptor_is_a_wait_error() {
    // Far above anything the test process has open.
    let err = poll_readable(1 << 30, Duration::from_millis(10)).unwrap_err();
    assert_eq!(err.raw_os_error(), Some(libc::EBADF));
}

#[test]
fn stream_interrupt_reaches_reader_waiting_on_fifo() {
    let dir = tempfile::tempdir().unwrap();
    let path = make_fifo(dir.path());
    let poll = Duration::from_millis(200);

    let writer_path = path.clone();
    let writer = thread::spawn(move || OpenOptions::new().write(true).open(writer_path).unwrap());
    let mut stream = StdinStreamBuilder::new()
        .with_provider(Arc::new(FileInput::new(path)))
        .with_poll_interval(poll)
        .build()
        .unwrap();
    stream.initialize().unwrap();
    let _writer = writer.join().unwrap();

    let handle = stream.interrupt_handle();
    let reader = thread::spawn(move || {
        let result = stream.input_available();
        (result.map_err(|e| e.is_interrupted()), Instant::now())
    });

    // Let the reader go through a few empty poll slices first.
    thread::sleep(Duration::from_millis(450));
    let interrupted_at = Instant::now();
    handle.interrupt();

    let (result, returned_at) = reader.join().unwrap();
    assert_eq!(result, Err(true));
    assert!(returned_at.duration_since(interrupted_at) <= poll + poll / 2);
}

#[test]
fn stream_reads_line_written_after_wait_started() {
    let dir = tempfile::tempdir().unwrap();
    let path = make_fifo(dir.path());

    let writer_path = path.clone();
    let writer = thread::spawn(move || {
        let mut fifo = OpenOptions::new().write(true).open(writer_path).unwrap();
        thread::sleep(Duration::from_millis(100));
        fifo.write_all(b"-exec-continue\r\n").unwrap();
    });
    let mut stream = StdinStreamBuilder::new()
        .with_provider(Arc::new(FileInput::new(path)))
        .with_poll_interval(Duration::from_millis(20))
        .build()
        .unwrap();
    stream.initialize().unwrap();

    stream.input_available().unwrap();
    assert_eq!(stream.read_line().unwrap().unwrap(), "-exec-continue");
    writer.join().unwrap();

    stream.input_available().unwrap();
    assert!(stream.read_line().unwrap().is_none());
}
