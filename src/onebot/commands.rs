use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

use crate::config::{ConfigError, RankSettings};
use crate::stats::{JsonEntityListing, JsonStatsDirectory, RankingEngine};

use super::connection_manager::ConnectionManager;
use super::messages::{ForwardMessageParams, InboundFrame, OneBotAction, OneBotEvent};
use super::socket::MessageHandler;

/// Answers leaderboard keywords posted in group chats.
///
/// Settings are re-read for every group message so edits to the settings file
/// apply without a restart.
pub struct RankCommandHandler {
    settings_path: PathBuf,
    base_dir: PathBuf,
    connection_manager: Arc<dyn ConnectionManager>,
}

impl RankCommandHandler {
    pub fn new(
        settings_path: PathBuf,
        base_dir: PathBuf,
        connection_manager: Arc<dyn ConnectionManager>,
    ) -> Self {
        Self {
            settings_path,
            base_dir,
            connection_manager,
        }
    }

    /// Builds the reply for one event, if the event asks for a leaderboard.
    pub async fn respond(
        &self,
        event: &OneBotEvent,
    ) -> Result<Option<OneBotAction<ForwardMessageParams>>, ConfigError> {
        if !event.is_group_message() {
            return Ok(None);
        }
        let Some(text) = event.first_text() else {
            return Ok(None);
        };
        let Some(group_id) = event.group_id else {
            return Ok(None);
        };

        let settings = RankSettings::load(&self.settings_path).await?;
        let Some((command, include_all)) = settings.match_command(text) else {
            return Ok(None);
        };

        info!(
            group_id,
            keyword = %text,
            stat_type = %command.stat_type,
            include_all,
            "Leaderboard requested"
        );

        let paths = &settings.file_paths;
        let engine = RankingEngine::builder(
            Arc::new(JsonEntityListing::new(paths.user_cache_path(&self.base_dir))),
            Arc::new(JsonStatsDirectory::new(
                paths.stats_directory_path(&self.base_dir),
            )),
        )
        .build();

        let body = engine
            .generate(command, &settings.stats_mapping, include_all)
            .await;

        Ok(Some(OneBotAction::send_forward_msg(
            group_id,
            &settings.bot,
            body,
        )))
    }
}

#[async_trait]
impl MessageHandler for RankCommandHandler {
    async fn handle_message(&self, self_id: &str, message: String) {
        let event = match serde_json::from_str::<InboundFrame>(&message) {
            Ok(InboundFrame::Event(event)) => event,
            Ok(InboundFrame::Response(response)) => {
                if !response.is_ok() {
                    warn!(
                        self_id = %self_id,
                        status = %response.status,
                        retcode = response.retcode,
                        "Bot framework rejected action"
                    );
                }
                return;
            }
            Err(e) => {
                warn!(self_id = %self_id, error = %e, "Failed to parse OneBot frame");
                return;
            }
        };

        let action = match self.respond(&event).await {
            Ok(Some(action)) => action,
            Ok(None) => {
                debug!(self_id = %self_id, post_type = ?event.post_type, "Ignoring event");
                return;
            }
            Err(err) => {
                error!(
                    self_id = %self_id,
                    path = %self.settings_path.display(),
                    error = %err,
                    "Failed to load settings"
                );
                return;
            }
        };

        let payload = match serde_json::to_string(&action) {
            Ok(payload) => payload,
            Err(e) => {
                error!(error = %e, "Failed to serialize forward message");
                return;
            }
        };

        if !self.connection_manager.send_to_bot(self_id, &payload).await {
            warn!(self_id = %self_id, "Bot connection gone before reply could be sent");
        }
    }
}
