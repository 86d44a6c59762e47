//! Cooperative cancellation of input waits.

use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crate::io::{ChannelFeeder, ChannelSource};
use crate::{StdinStream, StdinStreamBuilder, StreamError};

fn channel_stream(poll: Duration) -> (StdinStream, ChannelFeeder) {
    let (source, feeder) = ChannelSource::new("chan");
    let mut stream = StdinStreamBuilder::new()
        .with_provider(Arc::new(source))
        .with_poll_interval(poll)
        .build()
        .expect("build");
    stream.initialize().expect("initialize");
    (stream, feeder)
}

#[test]
fn interrupt_before_wait_returns_immediately() {
    let (mut stream, _feeder) = channel_stream(Duration::from_secs(1));
    stream.interrupt_read_line();

    let start = Instant::now();
    let err = stream.input_available().unwrap_err();
    assert!(err.is_interrupted());
    assert!(start.elapsed() < Duration::from_millis(200));
    assert_eq!(stream.last_error(), None);
}

#[test]
fn interrupt_wins_over_ready_input() {
    let (mut stream, feeder) = channel_stream(Duration::from_secs(1));
    assert!(feeder.send("pending\n"));
    stream.interrupt_handle().interrupt();

    assert!(matches!(
        stream.input_available(),
        Err(StreamError::Interrupted)
    ));
}

#[test]
fn interrupt_during_wait_returns_within_one_poll_interval() {
    let poll = Duration::from_millis(500);
    let (mut stream, _feeder) = channel_stream(poll);
    let handle = stream.interrupt_handle();

    let reader = thread::spawn(move || {
        let result = stream.input_available();
        (result.map_err(|e| e.is_interrupted()), Instant::now())
    });

    thread::sleep(Duration::from_millis(100));
    let interrupted_at = Instant::now();
    handle.interrupt();

    let (result, returned_at) = reader.join().unwrap();
    assert_eq!(result, Err(true));
    assert!(returned_at.duration_since(interrupted_at) <= poll + poll / 2);
}

#[test]
fn wait_keeps_polling_until_data_arrives() {
    let (mut stream, feeder) = channel_stream(Duration::from_millis(20));

    let sender = thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        feeder.send("late\n");
        feeder
    });

    stream.input_available().unwrap();
    assert_eq!(stream.read_line().unwrap().unwrap(), "late");
    drop(sender.join().unwrap());
    stream.input_available().unwrap();
    assert!(stream.read_line().unwrap().is_none());
}

#[test]
fn interruption_is_permanent() {
    let (mut stream, feeder) = channel_stream(Duration::from_millis(20));
    stream.interrupt_read_line();
    assert!(stream.is_interrupted());

    stream.shutdown();
    stream.initialize().unwrap();
    assert!(stream.is_interrupted());
    assert!(stream.input_available().unwrap_err().is_interrupted());

    // Reading directly still works; only waiting is cancelled.
    feeder.send("direct\n");
    assert_eq!(stream.read_line().unwrap().unwrap(), "direct");
}

#[test]
fn buffered_bytes_count_as_available() {
    let (mut stream, feeder) = channel_stream(Duration::from_secs(5));
    feeder.send("one\ntwo\n");

    stream.input_available().unwrap();
    assert_eq!(stream.read_line().unwrap().unwrap(), "one");

    // "two" already sits in the stream's read buffer; no wait needed.
    let start = Instant::now();
    stream.input_available().unwrap();
    assert!(start.elapsed() < Duration::from_secs(1));
    assert_eq!(stream.read_line().unwrap().unwrap(), "two");
}
