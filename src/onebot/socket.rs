use async_trait::async_trait;
use axum::extract::ws::{Message, WebSocket};
use futures::stream::StreamExt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::mpsc;

/// Text-frame view of a websocket.
#[async_trait]
pub trait SocketWrapper: Send {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError>;

    /// Next text frame; `None` once the peer has closed.
    async fn receive_message(&mut self) -> Result<Option<String>, SocketError>;

    async fn close(&mut self) -> Result<(), SocketError>;
}

/// Handles one inbound frame from a connected bot framework.
#[async_trait]
pub trait MessageHandler: Send + Sync {
    async fn handle_message(&self, self_id: &str, message: String);
}

#[derive(Debug, Error)]
pub enum SocketError {
    #[error("send failed: {0}")]
    SendFailed(String),
    #[error("receive failed: {0}")]
    ReceiveFailed(String),
}

#[async_trait]
impl SocketWrapper for WebSocket {
    async fn send_message(&mut self, message: String) -> Result<(), SocketError> {
        self.send(Message::Text(message))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }

    async fn receive_message(&mut self) -> Result<Option<String>, SocketError> {
        loop {
            match self.next().await {
                Some(Ok(Message::Text(text))) => return Ok(Some(text)),
                Some(Ok(Message::Close(_))) | None => return Ok(None),
                // Ping/pong are answered by axum; binary frames are not part of OneBot
                Some(Ok(_)) => continue,
                Some(Err(e)) => return Err(SocketError::ReceiveFailed(e.to_string())),
            }
        }
    }

    async fn close(&mut self) -> Result<(), SocketError> {
        self.send(Message::Close(None))
            .await
            .map_err(|e| SocketError::SendFailed(e.to_string()))
    }
}

/// A bot framework's reverse websocket. Outbound actions arrive on
/// `outbound_receiver` from the [`ConnectionManager`](super::ConnectionManager).
pub struct Connection {
    pub self_id: String,
    socket: Box<dyn SocketWrapper>,
    outbound_receiver: mpsc::UnboundedReceiver<String>,
    message_handler: Arc<dyn MessageHandler>,
}

impl Connection {
    pub fn new(
        self_id: String,
        socket: Box<dyn SocketWrapper>,
        outbound_receiver: mpsc::UnboundedReceiver<String>,
        message_handler: Arc<dyn MessageHandler>,
    ) -> Self {
        Self {
            self_id,
            socket,
            outbound_receiver,
            message_handler,
        }
    }

    /// Pumps frames both ways until either side goes away.
    pub async fn run(mut self) -> Result<(), SocketError> {
        loop {
            tokio::select! {
                msg = self.outbound_receiver.recv() => {
                    match msg {
                        Some(message) => self.socket.send_message(message).await?,
                        None => break,
                    }
                }

                msg = self.socket.receive_message() => {
                    match msg {
                        Ok(Some(message)) => {
                            self.message_handler
                                .handle_message(&self.self_id, message)
                                .await;
                        }
                        Ok(None) => break,
                        Err(e) => return Err(e),
                    }
                }
            }
        }

        let _ = self.socket.close().await;
        Ok(())
    }
}
