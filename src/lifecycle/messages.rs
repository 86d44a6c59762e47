//! Message catalog subsystem.
//!
//! Holds the text used to compose user-facing error descriptions. While the
//! catalog is stopped, lookups fall back to the built-in text, so messages
//! can still be formatted during a failed bring-up.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use super::Subsystem;
use crate::error::BoxError;

const PLACEHOLDER: &str = "{}";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageId {
    InitStdinHandler,
    ShutdownStdinHandler,
    OpenInput,
    InvalidConfig,
}

impl MessageId {
    pub const ALL: [MessageId; 4] = [
        MessageId::InitStdinHandler,
        MessageId::ShutdownStdinHandler,
        MessageId::OpenInput,
        MessageId::InvalidConfig,
    ];

    /// Built-in text; `{}` marks where the detail goes.
    pub fn default_text(self) -> &'static str {
        match self {
            MessageId::InitStdinHandler => "stdin handler failed to initialise: {}",
            MessageId::ShutdownStdinHandler => "stdin handler failed to shut down: {}",
            MessageId::OpenInput => "failed to open input: {}",
            MessageId::InvalidConfig => "invalid stdin stream configuration: {}",
        }
    }
}

#[derive(Debug, Default)]
struct CatalogState {
    overrides: HashMap<MessageId, String>,
    table: Option<HashMap<MessageId, String>>,
}

/// Shared message table. Clones refer to the same table.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    state: Arc<RwLock<CatalogState>>,
}

impl MessageCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the text for `id` from the next initialization on.
    pub fn with_override(self, id: MessageId, text: impl Into<String>) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.overrides.insert(id, text.into());
        }
        self
    }

    pub fn is_loaded(&self) -> bool {
        self.state.read().map(|s| s.table.is_some()).unwrap_or(false)
    }

    /// Current text for `id`.
    pub fn text(&self, id: MessageId) -> String {
        self.state
            .read()
            .ok()
            .and_then(|s| s.table.as_ref().and_then(|t| t.get(&id).cloned()))
            .unwrap_or_else(|| id.default_text().to_string())
    }

    /// Text for `id` with `detail` substituted for its placeholder.
    pub fn format(&self, id: MessageId, detail: &str) -> String {
        self.text(id).replacen(PLACEHOLDER, detail, 1)
    }
}

impl Subsystem for MessageCatalog {
    fn name(&self) -> &str {
        "messages"
    }

    fn initialize(&mut self) -> Result<(), BoxError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| "message catalog lock poisoned")?;

        let mut table = HashMap::with_capacity(MessageId::ALL.len());
        for id in MessageId::ALL {
            let text = match state.overrides.get(&id) {
                Some(text) if !text.contains(PLACEHOLDER) => {
                    return Err(
                        format!("override for {id:?} is missing its '{{}}' placeholder").into()
                    );
                }
                Some(text) => text.clone(),
                None => id.default_text().to_string(),
            };
            table.insert(id, text);
        }

        state.table = Some(table);
        debug!(overrides = state.overrides.len(), "message catalog loaded");
        Ok(())
    }

    fn shutdown(&mut self) -> Result<(), BoxError> {
        let mut state = self
            .state
            .write()
            .map_err(|_| "message catalog lock poisoned")?;
        state.table = None;
        Ok(())
    }
}
