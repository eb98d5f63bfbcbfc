use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::warn;

/// Outbound channels to connected bot frameworks, keyed by bot self id.
#[async_trait]
pub trait ConnectionManager: Send + Sync {
    async fn add_connection(&self, self_id: String, sender: mpsc::UnboundedSender<String>);

    async fn remove_connection(&self, self_id: &str);

    /// Returns false when no live connection exists for `self_id`.
    async fn send_to_bot(&self, self_id: &str, message: &str) -> bool;

    async fn count_connections(&self) -> usize;
}

#[derive(Default)]
pub struct InMemoryConnectionManager {
    connections: Arc<RwLock<HashMap<String, mpsc::UnboundedSender<String>>>>,
}

impl InMemoryConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ConnectionManager for InMemoryConnectionManager {
    async fn add_connection(&self, self_id: String, sender: mpsc::UnboundedSender<String>) {
        let mut connections = self.connections.write().await;
        if connections.insert(self_id.clone(), sender).is_some() {
            warn!(self_id = %self_id, "Replaced existing bot connection");
        }
    }

    async fn remove_connection(&self, self_id: &str) {
        let mut connections = self.connections.write().await;
        connections.remove(self_id);
    }

    async fn send_to_bot(&self, self_id: &str, message: &str) -> bool {
        let connections = self.connections.read().await;
        match connections.get(self_id) {
            Some(sender) => sender.send(message.to_string()).is_ok(),
            None => false,
        }
    }

    async fn count_connections(&self) -> usize {
        self.connections.read().await.len()
    }
}
