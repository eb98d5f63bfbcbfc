use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use super::{
    finalize, format, DiagnosticSink, EntitySource, RankCommandSpec, RankingAggregator,
    StatMapping, StatsSource, TracingDiagnostics,
};

pub const MISSING_MAPPING_MESSAGE: &str = "no mapping for this stat type";
pub const LISTING_UNAVAILABLE_MESSAGE: &str = "unable to load player data";

/// Produces leaderboard text for a command. Every call re-reads the listing
/// and each entity's document; nothing is cached between calls.
pub struct RankingEngine {
    entity_source: Arc<dyn EntitySource>,
    aggregator: RankingAggregator,
}

impl RankingEngine {
    pub fn builder(
        entity_source: Arc<dyn EntitySource>,
        stats_source: Arc<dyn StatsSource>,
    ) -> RankingEngineBuilder {
        RankingEngineBuilder::new(entity_source, stats_source)
    }

    /// Returns the formatted ranking, or a plain diagnostic line when the stat
    /// type has no mapping or the entity listing cannot be loaded.
    pub async fn generate(
        &self,
        command: &RankCommandSpec,
        mappings: &HashMap<String, StatMapping>,
        include_all: bool,
    ) -> String {
        let Some(mapping) = mappings.get(&command.stat_type) else {
            warn!(stat_type = %command.stat_type, "No stat mapping for command");
            return MISSING_MAPPING_MESSAGE.to_string();
        };

        let entities = match self.entity_source.list_entities().await {
            Ok(entities) => entities,
            Err(err) => {
                warn!(error = %err, "Failed to load entity listing");
                return LISTING_UNAVAILABLE_MESSAGE.to_string();
            }
        };

        let entries = self.aggregator.aggregate(&entities, mapping).await;
        let ranked = finalize(entries, command.sort_order, command.top_n, include_all);

        info!(
            stat_type = %command.stat_type,
            include_all,
            shown = ranked.len(),
            "Generated ranking"
        );

        format(&command.title, &command.line_format, &ranked)
    }
}

pub struct RankingEngineBuilder {
    entity_source: Arc<dyn EntitySource>,
    stats_source: Arc<dyn StatsSource>,
    diagnostics: Arc<dyn DiagnosticSink>,
}

impl RankingEngineBuilder {
    fn new(entity_source: Arc<dyn EntitySource>, stats_source: Arc<dyn StatsSource>) -> Self {
        Self {
            entity_source,
            stats_source,
            diagnostics: Arc::new(TracingDiagnostics),
        }
    }

    pub fn with_diagnostics(mut self, diagnostics: Arc<dyn DiagnosticSink>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn build(self) -> RankingEngine {
        RankingEngine {
            entity_source: self.entity_source,
            aggregator: RankingAggregator::new(self.stats_source, self.diagnostics),
        }
    }
}
