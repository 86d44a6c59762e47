use std::error::Error;
use std::io::Write;
use std::thread;
use std::time::Duration;

use lineio::cli::InputArg;
use lineio::{StdinStreamBuilder, StreamConfig};
use sarge::prelude::*;

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  lineio_repl [--input <token>] [--poll-ms <ms>]");
    eprintln!("              [--timeout-secs <secs>] [--capacity <bytes>]");
    eprintln!();
    eprintln!("Input tokens:");
    eprintln!("  - | stdin          Read from stdin (default)");
    eprintln!("  @<path> | <path>   Read from a file");
    eprintln!();
    eprintln!("Each line read is echoed back. With --timeout-secs, a controller");
    eprintln!("thread interrupts the reader after that many seconds.");
}

/// Stand-in for a command dispatcher: echoes each line.
fn dispatch(out: &mut impl Write, line: &str) -> std::io::Result<()> {
    writeln!(out, "> {line}")
}

fn run() -> Result<(), Box<dyn Error>> {
    let mut reader = ArgumentReader::new();

    let input_ref = reader.add::<InputArg>(tag::both('i', "input"));
    let poll_ref = reader.add::<u64>(tag::long("poll-ms"));
    let timeout_ref = reader.add::<u64>(tag::long("timeout-secs"));
    let capacity_ref = reader.add::<u64>(tag::long("capacity"));

    let args = reader.parse()?;

    let input = match input_ref.get(&args) {
        Some(Ok(v)) => v,
        Some(Err(_)) => unreachable!("InputArg parsing is infallible"),
        None => InputArg::default(),
    };

    let mut config = StreamConfig::default().with_input(input.into_config());
    if let Some(ms) = poll_ref.get(&args) {
        config = config.with_poll_interval(Duration::from_millis(ms?));
    }
    if let Some(capacity) = capacity_ref.get(&args) {
        config = config.with_buffer_capacity(usize::try_from(capacity?)?);
    }
    let timeout = timeout_ref.get(&args).transpose()?.map(Duration::from_secs);

    let mut stream = StdinStreamBuilder::from_config(config).build()?;
    stream.initialize()?;

    if let Some(timeout) = timeout {
        let interrupt = stream.interrupt_handle();
        thread::spawn(move || {
            thread::sleep(timeout);
            interrupt.interrupt();
        });
    }

    let worker = thread::spawn(move || -> Result<(), String> {
        let mut out = std::io::stdout();
        let outcome = loop {
            if let Err(e) = stream.input_available() {
                if e.is_interrupted() {
                    eprintln!("lineio_repl: interrupted");
                    break Ok(());
                }
                break Err(e.to_string());
            }
            match stream.read_line() {
                Ok(Some(line)) => {
                    if let Err(e) = dispatch(&mut out, &line.to_string_lossy()) {
                        break Err(e.to_string());
                    }
                }
                Ok(None) => break Ok(()),
                Err(e) => break Err(e.to_string()),
            }
        };

        stream.shutdown();
        if let Some(e) = stream.last_error() {
            eprintln!("lineio_repl: {e}");
        }
        outcome
    });

    worker
        .join()
        .map_err(|_| "reader thread panicked")?
        .map_err(Into::into)
}

fn main() {
    if let Err(e) = run() {
        eprintln!("lineio_repl error: {e}");
        print_usage();
        std::process::exit(1);
    }
}
