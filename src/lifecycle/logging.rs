//! Log facility subsystem.

use std::io::Write;
use std::sync::Once;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use super::Subsystem;
use crate::error::BoxError;

static INSTALL: Once = Once::new();

/// Installs a `tracing` formatter on stderr.
///
/// The global subscriber can only be set once per process. Later
/// initializations, or a subscriber installed by the host application,
/// leave the existing one in place.
#[derive(Debug, Clone)]
pub struct LogFacility {
    filter: String,
}

impl LogFacility {
    /// `filter` is an `EnvFilter` directive; `RUST_LOG` overrides it when set.
    pub fn new(filter: impl Into<String>) -> Self {
        Self {
            filter: filter.into(),
        }
    }

    pub fn filter(&self) -> &str {
        &self.filter
    }
}

impl Subsystem for LogFacility {
    fn name(&self) -> &str {
        "log"
    }

    fn initialize(&mut self) -> Result<(), BoxError> {
        let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
        let filter = resolve_filter(&self.filter, env.as_deref())?;

        INSTALL.call_once(|| {
            // Err means the host already installed a subscriber; keep it.
            let _ = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .try_init();
        });
        debug!(filter = %self.filter, "log facility ready");
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), BoxError> {
        debug!("log facility stopping");
        std::io::stderr().flush()?;
        Ok(())
    }
}

/// Pick the active filter: a valid `RUST_LOG` value wins, otherwise the
/// configured directive, which must then parse.
pub(crate) fn resolve_filter(configured: &str, env: Option<&str>) -> Result<EnvFilter, BoxError> {
    if let Some(filter) = env.and_then(|directive| EnvFilter::try_new(directive).ok()) {
        return Ok(filter);
    }
    EnvFilter::try_new(configured)
        .map_err(|e| format!("invalid log filter '{configured}': {e}").into())
}
