use rankboard::config::{RankSettings, ServerConfig};
use rankboard::onebot::{InMemoryConnectionManager, RankCommandHandler};
use rankboard::shared::{router, AppState};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::io::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "rankboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env();
    info!(
        settings = %config.settings_path.display(),
        base_dir = %config.base_dir.display(),
        "Starting leaderboard bot"
    );

    // Settings are reloaded per command; this only surfaces mistakes early
    match RankSettings::load(&config.settings_path).await {
        Ok(settings) => info!(
            commands = settings.rank_commands.len(),
            mappings = settings.stats_mapping.len(),
            "Settings look valid"
        ),
        Err(err) => warn!(error = %err, "Settings not usable yet, commands will fail until fixed"),
    }

    let connection_manager = Arc::new(InMemoryConnectionManager::new());
    let message_handler = Arc::new(RankCommandHandler::new(
        config.settings_path.clone(),
        config.base_dir.clone(),
        connection_manager.clone(),
    ));
    let app_state = AppState::new(connection_manager, message_handler, config.access_token);

    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    info!(addr = %config.listen_addr, "Waiting for OneBot reverse websocket on /onebot/v11/ws");
    axum::serve(listener, router(app_state)).await
}
