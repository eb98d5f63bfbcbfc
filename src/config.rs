use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::stats::repository::strip_bom;
use crate::stats::{RankCommandSpec, StatMapping};

pub const CONFIG_PATH_ENV: &str = "RANKBOARD_CONFIG";
pub const BASE_DIR_ENV: &str = "RANKBOARD_BASE_DIR";
pub const LISTEN_ADDR_ENV: &str = "RANKBOARD_ADDR";
pub const ACCESS_TOKEN_ENV: &str = "RANKBOARD_ACCESS_TOKEN";

const DEFAULT_CONFIG_PATH: &str = "setting.json";
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Settings file not found: {0}")]
    NotFound(String),

    #[error("Failed to read settings {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Failed to parse settings {path}: {reason}")]
    Parse { path: String, reason: String },
}

/// Contents of the settings JSON file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankSettings {
    #[serde(rename = "RankCommands", default)]
    pub rank_commands: Vec<RankCommandSpec>,
    #[serde(rename = "StatsMapping", default)]
    pub stats_mapping: HashMap<String, StatMapping>,
    #[serde(rename = "FilePaths", default)]
    pub file_paths: FilePaths,
    #[serde(rename = "Bot", default)]
    pub bot: BotIdentity,
}

impl RankSettings {
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let shown = path.display().to_string();
        let raw = match tokio::fs::read_to_string(path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::NotFound(shown))
            }
            Err(e) => {
                return Err(ConfigError::Io {
                    path: shown,
                    reason: e.to_string(),
                })
            }
        };

        let settings: RankSettings =
            serde_json::from_str(strip_bom(&raw)).map_err(|e| ConfigError::Parse {
                path: shown.clone(),
                reason: e.to_string(),
            })?;

        debug!(
            path = %shown,
            commands = settings.rank_commands.len(),
            mappings = settings.stats_mapping.len(),
            "Loaded settings"
        );
        Ok(settings)
    }

    /// First command triggered by `text`, with whether it was the
    /// "show everyone" keyword.
    pub fn match_command(&self, text: &str) -> Option<(&RankCommandSpec, bool)> {
        self.rank_commands
            .iter()
            .find_map(|command| command.matches(text).map(|all| (command, all)))
    }
}

/// Data file locations, relative to the configured base directory unless
/// absolute.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilePaths {
    #[serde(rename = "UserCache", default)]
    pub user_cache: String,
    #[serde(rename = "StatsDirectory", default)]
    pub stats_directory: String,
}

impl FilePaths {
    pub fn user_cache_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.user_cache)
    }

    pub fn stats_directory_path(&self, base_dir: &Path) -> PathBuf {
        base_dir.join(&self.stats_directory)
    }
}

/// Sender shown on forwarded leaderboard messages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotIdentity {
    #[serde(rename = "UserId", default = "default_bot_user_id")]
    pub user_id: i64,
    #[serde(rename = "Nickname", default = "default_bot_nickname")]
    pub nickname: String,
}

fn default_bot_user_id() -> i64 {
    2590759258
}

fn default_bot_nickname() -> String {
    "Leaderboard".to_string()
}

impl Default for BotIdentity {
    fn default() -> Self {
        Self {
            user_id: default_bot_user_id(),
            nickname: default_bot_nickname(),
        }
    }
}

/// Process-level settings taken from the environment at startup.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub settings_path: PathBuf,
    pub base_dir: PathBuf,
    pub listen_addr: String,
    /// Required from connecting bot frameworks when set.
    pub access_token: Option<String>,
}

impl ServerConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let settings_path = PathBuf::from(
            lookup(CONFIG_PATH_ENV).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string()),
        );
        let base_dir = lookup(BASE_DIR_ENV).map(PathBuf::from).unwrap_or_else(|| {
            settings_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_default()
        });
        let listen_addr =
            lookup(LISTEN_ADDR_ENV).unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string());

        let access_token = lookup(ACCESS_TOKEN_ENV).filter(|token| !token.is_empty());

        Self {
            settings_path,
            base_dir,
            listen_addr,
            access_token,
        }
    }
}
