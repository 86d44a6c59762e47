#[cfg(feature = "sarge")]
mod sarge_tests;
