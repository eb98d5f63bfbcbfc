use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};

use rankboard::onebot::ConnectionManager;

// ============================================================================
// Mock Infrastructure
// ============================================================================

#[derive(Clone, Default)]
pub struct MockConnectionManager {
    sent_messages: Arc<RwLock<HashMap<String, Vec<String>>>>,
    connected_bots: Arc<RwLock<Vec<String>>>,
}

impl MockConnectionManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn connect(&self, self_id: &str) {
        self.connected_bots.write().await.push(self_id.to_string());
    }

    pub async fn get_messages_for(&self, self_id: &str) -> Vec<String> {
        self.sent_messages
            .read()
            .await
            .get(self_id)
            .cloned()
            .unwrap_or_default()
    }

    pub async fn get_json_messages_for(&self, self_id: &str) -> Vec<serde_json::Value> {
        self.get_messages_for(self_id)
            .await
            .iter()
            .map(|raw| serde_json::from_str(raw).expect("sent frames are JSON"))
            .collect()
    }
}

#[async_trait]
impl ConnectionManager for MockConnectionManager {
    async fn add_connection(&self, self_id: String, _sender: mpsc::UnboundedSender<String>) {
        self.connect(&self_id).await;
    }

    async fn remove_connection(&self, self_id: &str) {
        self.connected_bots.write().await.retain(|b| b != self_id);
    }

    async fn send_to_bot(&self, self_id: &str, message: &str) -> bool {
        if !self.connected_bots.read().await.iter().any(|b| b == self_id) {
            return false;
        }
        self.sent_messages
            .write()
            .await
            .entry(self_id.to_string())
            .or_default()
            .push(message.to_string());
        true
    }

    async fn count_connections(&self) -> usize {
        self.connected_bots.read().await.len()
    }
}
