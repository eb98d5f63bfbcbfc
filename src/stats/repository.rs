use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::{EntityRef, StatsError};

/// Drops a leading UTF-8 byte order mark, which `serde_json` rejects.
pub fn strip_bom(raw: &str) -> &str {
    raw.strip_prefix('\u{feff}').unwrap_or(raw)
}

/// Source of the entities to rank, in listing order.
#[async_trait]
pub trait EntitySource: Send + Sync {
    async fn list_entities(&self) -> Result<Vec<EntityRef>, StatsError>;
}

/// Per-entity raw stats documents keyed by entity id.
/// `Ok(None)` means the entity has no document yet.
#[async_trait]
pub trait StatsSource: Send + Sync {
    async fn load_document(&self, entity_id: &str) -> Result<Option<Value>, StatsError>;
}

/// Entity listing read from a JSON array file such as `usercache.json`.
#[derive(Debug, Clone)]
pub struct JsonEntityListing {
    path: PathBuf,
}

impl JsonEntityListing {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EntitySource for JsonEntityListing {
    #[instrument(skip(self), fields(path = %self.path.display()))]
    async fn list_entities(&self) -> Result<Vec<EntityRef>, StatsError> {
        let raw = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            StatsError::Repository(format!("cannot read {}: {e}", self.path.display()))
        })?;
        // A `null` listing is a server that has not seen any players yet
        let entities: Option<Vec<EntityRef>> = serde_json::from_str(strip_bom(&raw))?;
        let entities = entities.unwrap_or_default();
        debug!(count = entities.len(), "Loaded entity listing");
        Ok(entities)
    }
}

/// Directory holding one `<entity id>.json` document per entity.
#[derive(Debug, Clone)]
pub struct JsonStatsDirectory {
    dir: PathBuf,
}

impl JsonStatsDirectory {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn document_path(&self, entity_id: &str) -> PathBuf {
        self.dir.join(format!("{entity_id}.json"))
    }
}

#[async_trait]
impl StatsSource for JsonStatsDirectory {
    async fn load_document(&self, entity_id: &str) -> Result<Option<Value>, StatsError> {
        let path = self.document_path(entity_id);
        let raw = match tokio::fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(StatsError::Repository(format!(
                    "cannot read {}: {e}",
                    path.display()
                )))
            }
        };
        Ok(Some(serde_json::from_str(strip_bom(&raw))?))
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryEntitySource {
    entities: Arc<RwLock<Vec<EntityRef>>>,
}

impl InMemoryEntitySource {
    pub fn new(entities: Vec<EntityRef>) -> Self {
        Self {
            entities: Arc::new(RwLock::new(entities)),
        }
    }

    pub async fn push(&self, entity: EntityRef) {
        self.entities.write().await.push(entity);
    }
}

#[async_trait]
impl EntitySource for InMemoryEntitySource {
    async fn list_entities(&self) -> Result<Vec<EntityRef>, StatsError> {
        Ok(self.entities.read().await.clone())
    }
}

/// Holds raw document text so malformed documents can be represented too.
#[derive(Debug, Default, Clone)]
pub struct InMemoryStatsSource {
    documents: Arc<RwLock<HashMap<String, String>>>,
}

impl InMemoryStatsSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, entity_id: impl Into<String>, raw: impl Into<String>) {
        self.documents
            .write()
            .await
            .insert(entity_id.into(), raw.into());
    }

    pub async fn insert_value(&self, entity_id: impl Into<String>, document: &Value) {
        self.insert(entity_id, document.to_string()).await;
    }
}

#[async_trait]
impl StatsSource for InMemoryStatsSource {
    async fn load_document(&self, entity_id: &str) -> Result<Option<Value>, StatsError> {
        let documents = self.documents.read().await;
        match documents.get(entity_id) {
            Some(raw) => Ok(Some(serde_json::from_str(strip_bom(raw))?)),
            None => Ok(None),
        }
    }
}
