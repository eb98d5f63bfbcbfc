use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Builds a throwaway server directory holding a settings file, an entity
/// listing and per-entity stats documents.
pub struct ServerDirBuilder {
    commands: Vec<Value>,
    mappings: serde_json::Map<String, Value>,
    players: Vec<(String, String)>,
    documents: Vec<(String, String)>,
    write_listing: bool,
}

impl ServerDirBuilder {
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
            mappings: serde_json::Map::new(),
            players: Vec::new(),
            documents: Vec::new(),
            write_listing: true,
        }
    }

    pub fn with_command(mut self, command: Value) -> Self {
        self.commands.push(command);
        self
    }

    pub fn with_mapping(mut self, stat_type: &str, path: &[&str], transform: Option<&str>) -> Self {
        self.mappings.insert(
            stat_type.to_string(),
            json!({"Path": path, "Transform": transform}),
        );
        self
    }

    pub fn with_player(mut self, name: &str, uuid: &str, stats: Value) -> Self {
        self.players.push((name.to_string(), uuid.to_string()));
        self.documents.push((uuid.to_string(), stats.to_string()));
        self
    }

    /// Listed player with no stats file yet.
    pub fn with_player_without_stats(mut self, name: &str, uuid: &str) -> Self {
        self.players.push((name.to_string(), uuid.to_string()));
        self
    }

    pub fn with_raw_document(mut self, name: &str, uuid: &str, raw: &str) -> Self {
        self.players.push((name.to_string(), uuid.to_string()));
        self.documents.push((uuid.to_string(), raw.to_string()));
        self
    }

    pub fn without_listing(mut self) -> Self {
        self.write_listing = false;
        self
    }

    pub fn build(self) -> ServerDir {
        let dir = tempfile::tempdir().expect("temp dir");
        let root = dir.path();

        let settings = json!({
            "RankCommands": self.commands,
            "StatsMapping": self.mappings,
            "FilePaths": {"UserCache": "usercache.json", "StatsDirectory": "world/stats"},
            "Bot": {"UserId": 1000, "Nickname": "Leaderboard"}
        });
        std::fs::write(root.join("setting.json"), settings.to_string()).expect("settings");

        if self.write_listing {
            let listing: Vec<Value> = self
                .players
                .iter()
                .map(|(name, uuid)| json!({"name": name, "uuid": uuid}))
                .collect();
            std::fs::write(root.join("usercache.json"), Value::from(listing).to_string())
                .expect("listing");
        }

        let stats_dir = root.join("world/stats");
        std::fs::create_dir_all(&stats_dir).expect("stats dir");
        for (uuid, raw) in &self.documents {
            std::fs::write(stats_dir.join(format!("{uuid}.json")), raw).expect("stats doc");
        }

        ServerDir { dir }
    }
}

pub struct ServerDir {
    dir: TempDir,
}

impl ServerDir {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn settings_path(&self) -> PathBuf {
        self.root().join("setting.json")
    }
}

pub fn group_message(group_id: i64, text: &str) -> String {
    json!({
        "post_type": "message",
        "message_type": "group",
        "self_id": 1000,
        "group_id": group_id,
        "user_id": 7,
        "message": [{"type": "text", "data": {"text": text}}]
    })
    .to_string()
}
