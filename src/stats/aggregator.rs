use std::sync::Arc;

use tracing::debug;

use super::{
    extractor::extract, transform::transform, DiagnosticSink, EntityRef, RankEntry, StatMapping,
    StatsError, StatsSource,
};

/// Turns a list of entities into unsorted rank entries for one stat mapping.
pub struct RankingAggregator {
    stats_source: Arc<dyn StatsSource>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl RankingAggregator {
    pub fn new(stats_source: Arc<dyn StatsSource>, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        Self {
            stats_source,
            diagnostics,
        }
    }

    /// Entries come back in listing order. Entities without a document,
    /// without the stat, or with a scaled value of zero or less are left out;
    /// unreadable documents are reported to the diagnostic sink and left out.
    pub async fn aggregate(&self, entities: &[EntityRef], mapping: &StatMapping) -> Vec<RankEntry> {
        let mut entries = Vec::new();

        for entity in entities {
            match self.entity_value(entity, mapping).await {
                Ok(Some(value)) if value > 0 => {
                    entries.push(RankEntry::new(entity.display_name.clone(), value));
                }
                Ok(_) => {}
                Err(err) => self.diagnostics.entity_skipped(entity, &err),
            }
        }

        debug!(
            entities = entities.len(),
            ranked = entries.len(),
            "Aggregated stat values"
        );
        entries
    }

    async fn entity_value(
        &self,
        entity: &EntityRef,
        mapping: &StatMapping,
    ) -> Result<Option<i64>, StatsError> {
        let Some(document) = self.stats_source.load_document(&entity.id).await? else {
            return Ok(None);
        };

        let raw = extract(&document, mapping.path.as_slice())?;
        Ok(raw.map(|value| transform(value, mapping.transform.as_deref())))
    }
}
