use axum::{
    extract::{State, WebSocketUpgrade},
    http::HeaderMap,
    response::Response,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::shared::{AppError, AppState};

use super::socket::Connection;

pub const SELF_ID_HEADER: &str = "x-self-id";
const DEFAULT_SELF_ID: &str = "default";

/// Reverse websocket endpoint the bot framework connects to.
/// GET /onebot/v11/ws
pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    headers: HeaderMap,
    State(app_state): State<AppState>,
) -> Result<Response, AppError> {
    authorize(&headers, app_state.access_token.as_deref())?;

    let self_id = headers
        .get(SELF_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .unwrap_or(DEFAULT_SELF_ID)
        .to_string();

    info!(self_id = %self_id, "Bot framework connecting");
    Ok(ws.on_upgrade(move |socket| handle_websocket_connection(socket, self_id, app_state)))
}

/// Accepts `Authorization: Bearer <token>` or `Authorization: Token <token>`
/// when an access token is configured.
pub fn authorize(headers: &HeaderMap, access_token: Option<&str>) -> Result<(), AppError> {
    let Some(expected) = access_token else {
        return Ok(());
    };

    let provided = headers
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .and_then(|value| {
            value
                .strip_prefix("Bearer ")
                .or_else(|| value.strip_prefix("Token "))
        });

    match provided {
        Some(token) if token == expected => Ok(()),
        _ => {
            warn!("Rejected bot connection with missing or wrong access token");
            Err(AppError::Unauthorized("Invalid access token".to_string()))
        }
    }
}

async fn handle_websocket_connection(
    socket: axum::extract::ws::WebSocket,
    self_id: String,
    app_state: AppState,
) {
    let (outbound_sender, outbound_receiver) = mpsc::unbounded_channel::<String>();
    app_state
        .connection_manager
        .add_connection(self_id.clone(), outbound_sender)
        .await;

    info!(self_id = %self_id, "Bot framework connected");

    let connection = Connection::new(
        self_id.clone(),
        Box::new(socket),
        outbound_receiver,
        app_state.message_handler.clone(),
    );

    match connection.run().await {
        Ok(()) => info!(self_id = %self_id, "Bot connection closed cleanly"),
        Err(e) => warn!(self_id = %self_id, error = %e, "Bot connection error"),
    }

    app_state
        .connection_manager
        .remove_connection(&self_id)
        .await;
}
