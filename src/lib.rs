// Library crate for the leaderboard bot
// This file exposes the public API for integration tests

pub mod config;
pub mod onebot;
pub mod shared;
pub mod stats;

pub use config::{ConfigError, RankSettings, ServerConfig};
pub use shared::{AppError, AppState};
pub use stats::{RankCommandSpec, RankingEngine, StatMapping, StatsError};
