// Leaderboard core
//
// Reads per-entity stats documents, pulls one numeric stat out of each,
// scales it, then sorts, truncates and renders the result as text.

pub mod aggregator;
pub mod diagnostics;
pub mod extractor;
pub mod formatter;
pub mod ranking;
pub mod repository;
pub mod service;
pub mod transform;

mod errors;
pub mod models;

pub use aggregator::RankingAggregator;
pub use diagnostics::{DiagnosticSink, RecordingDiagnostics, TracingDiagnostics};
pub use errors::StatsError;
pub use extractor::extract;
pub use formatter::format;
pub use models::*;
pub use ranking::finalize;
pub use repository::{
    EntitySource, InMemoryEntitySource, InMemoryStatsSource, JsonEntityListing,
    JsonStatsDirectory, StatsSource,
};
pub use service::{
    RankingEngine, RankingEngineBuilder, LISTING_UNAVAILABLE_MESSAGE, MISSING_MAPPING_MESSAGE,
};
pub use transform::{transform, UnitScale};
