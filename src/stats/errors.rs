use thiserror::Error;

#[derive(Debug, Error)]
pub enum StatsError {
    #[error("Repository error: {0}")]
    Repository(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Extraction error: {0}")]
    Extraction(String),
}

impl From<serde_json::Error> for StatsError {
    fn from(err: serde_json::Error) -> Self {
        StatsError::Parse(err.to_string())
    }
}
