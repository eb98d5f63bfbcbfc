use std::sync::Mutex;

use tracing::warn;

use super::{EntityRef, StatsError};

/// Receives per-entity problems the aggregator skips over.
pub trait DiagnosticSink: Send + Sync {
    fn entity_skipped(&self, entity: &EntityRef, error: &StatsError);
}

/// Default sink: one structured `warn!` per skipped entity.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingDiagnostics;

impl DiagnosticSink for TracingDiagnostics {
    fn entity_skipped(&self, entity: &EntityRef, error: &StatsError) {
        warn!(
            entity_id = %entity.id,
            entity_name = %entity.display_name,
            error = %error,
            "Failed to read stats document, skipping entity"
        );
    }
}

/// Keeps `(entity id, message)` pairs in memory.
#[derive(Debug, Default)]
pub struct RecordingDiagnostics {
    records: Mutex<Vec<(String, String)>>,
}

impl RecordingDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> Vec<(String, String)> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl DiagnosticSink for RecordingDiagnostics {
    fn entity_skipped(&self, entity: &EntityRef, error: &StatsError) {
        if let Ok(mut guard) = self.records.lock() {
            guard.push((entity.id.clone(), error.to_string()));
        }
    }
}
