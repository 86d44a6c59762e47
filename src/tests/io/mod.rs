#[cfg(unix)]
mod fifo_tests;
