use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use crate::onebot::{websocket_handler, ConnectionManager, MessageHandler};

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub connection_manager: Arc<dyn ConnectionManager>,
    pub message_handler: Arc<dyn MessageHandler>,
    pub access_token: Option<String>,
}

impl AppState {
    pub fn new(
        connection_manager: Arc<dyn ConnectionManager>,
        message_handler: Arc<dyn MessageHandler>,
        access_token: Option<String>,
    ) -> Self {
        Self {
            connection_manager,
            message_handler,
            access_token,
        }
    }
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/onebot/v11/ws", get(websocket_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };

        let body = Json(json!({
            "error": error_message
        }));

        (status, body).into_response()
    }
}
