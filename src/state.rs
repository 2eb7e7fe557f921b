// src/state.rs
// Shared application state handed to every handler.

use std::time::Instant;

use crate::engine::HumanizationEngine;
use crate::store::TransformationStore;

pub struct AppState {
    pub store: TransformationStore,
    pub engine: HumanizationEngine,
    /// Process start, for the /health uptime report.
    pub started_at: Instant,
}

impl AppState {
    pub fn new(store: TransformationStore, engine: HumanizationEngine) -> Self {
        Self {
            store,
            engine,
            started_at: Instant::now(),
        }
    }
}
