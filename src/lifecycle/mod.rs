//! Ordered bring-up and tear-down of named subsystems.
//!
//! A [`Lifecycle`] is an explicit registry built by the application and
//! handed to whatever depends on it. Subsystems start in registration order
//! and stop in exactly the reverse order. Failures are collected into a
//! [`LifecycleError`] instead of aborting the pass midway, unless the caller
//! asks for [`ErrorPolicy::FastFail`] on bring-up.

use std::fmt;

use tracing::{debug, warn};

use crate::error::{BoxError, ErrorPolicy, LifecycleError, Phase, SubsystemError};

mod logging;
mod messages;

pub use logging::LogFacility;
#[cfg(test)]
pub(crate) use logging::resolve_filter;
pub use messages::{MessageCatalog, MessageId};

/// A subsystem with an explicit start/stop contract.
pub trait Subsystem: Send + fmt::Debug {
    /// Name used in logs and error reports.
    fn name(&self) -> &str;

    fn initialize(&mut self) -> Result<(), BoxError>;

    fn shutdown(&mut self) -> Result<(), BoxError>;
}

/// Subsystem built from a pair of closures.
pub struct FnSubsystem<I, S> {
    name: String,
    init: I,
    stop: S,
}

impl<I, S> FnSubsystem<I, S>
where
    I: FnMut() -> Result<(), BoxError> + Send,
    S: FnMut() -> Result<(), BoxError> + Send,
{
    pub fn new(name: impl Into<String>, init: I, stop: S) -> Self {
        Self {
            name: name.into(),
            init,
            stop,
        }
    }
}

impl<I, S> fmt::Debug for FnSubsystem<I, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSubsystem")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<I, S> Subsystem for FnSubsystem<I, S>
where
    I: FnMut() -> Result<(), BoxError> + Send,
    S: FnMut() -> Result<(), BoxError> + Send,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn initialize(&mut self) -> Result<(), BoxError> {
        (self.init)()
    }

    fn shutdown(&mut self) -> Result<(), BoxError> {
        (self.stop)()
    }
}

#[derive(Debug)]
struct Entry {
    subsystem: Box<dyn Subsystem>,
    started: bool,
}

/// Ordered registry of subsystems.
#[derive(Debug, Default)]
pub struct Lifecycle {
    entries: Vec<Entry>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a subsystem; it starts after everything registered before it.
    pub fn with(mut self, subsystem: impl Subsystem + 'static) -> Self {
        self.register(Box::new(subsystem));
        self
    }

    pub fn register(&mut self, subsystem: Box<dyn Subsystem>) {
        self.entries.push(Entry {
            subsystem,
            started: false,
        });
    }

    /// Start every subsystem not already running, in registration order.
    pub fn initialize(&mut self, policy: ErrorPolicy) -> Result<(), LifecycleError> {
        let mut errors = Vec::new();

        for entry in self.entries.iter_mut().filter(|e| !e.started) {
            let name = entry.subsystem.name().to_string();
            match entry.subsystem.initialize() {
                Ok(()) => {
                    entry.started = true;
                    debug!(subsystem = %name, "subsystem started");
                }
                Err(e) => {
                    warn!(subsystem = %name, error = %e, "subsystem failed to start");
                    errors.push(SubsystemError::new(Phase::Initialize, name, e));
                    if matches!(policy, ErrorPolicy::FastFail) {
                        break;
                    }
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LifecycleError { errors })
        }
    }

    /// Stop every running subsystem in reverse order.
    ///
    /// Every running subsystem gets a stop attempt. A subsystem whose stop
    /// fails is still considered stopped, so a second call is a no-op.
    pub fn shutdown(&mut self) -> Result<(), LifecycleError> {
        let mut errors = Vec::new();

        for entry in self.entries.iter_mut().rev().filter(|e| e.started) {
            entry.started = false;
            let name = entry.subsystem.name().to_string();
            match entry.subsystem.shutdown() {
                Ok(()) => debug!(subsystem = %name, "subsystem stopped"),
                Err(e) => {
                    warn!(subsystem = %name, error = %e, "subsystem failed to stop");
                    errors.push(SubsystemError::new(Phase::Shutdown, name, e));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(LifecycleError { errors })
        }
    }

    pub fn is_started(&self, name: &str) -> bool {
        self.entries
            .iter()
            .any(|e| e.started && e.subsystem.name() == name)
    }

    /// Subsystem names in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|e| e.subsystem.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
