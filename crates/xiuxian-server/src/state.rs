//! Shared application state for the player API.

use std::collections::BTreeMap;

use xiuxian_core::config::ExplorationConfig;
use xiuxian_core::{ExplorationService, ExplorationStore};
use xiuxian_types::UserId;

/// State shared by every handler.
#[derive(Debug)]
pub struct AppState<S> {
    /// The exploration orchestrator.
    pub service: ExplorationService<S>,
    /// Bearer token to user id. Empty when an upstream layer authenticates.
    pub sessions: BTreeMap<String, UserId>,
}

impl<S: ExplorationStore> AppState<S> {
    /// State with no session table.
    pub const fn new(service: ExplorationService<S>) -> Self {
        Self {
            service,
            sessions: BTreeMap::new(),
        }
    }

    /// Attach a session table.
    #[must_use]
    pub fn with_sessions(mut self, sessions: BTreeMap<String, UserId>) -> Self {
        self.sessions = sessions;
        self
    }

    /// The exploration settings.
    pub const fn exploration(&self) -> &ExplorationConfig {
        self.service.config()
    }
}
