pub mod http;

use crate::domain::score::ScoreRecord;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FetchError {
    /// Backend reachable but answered with a non-success status.
    #[error("scores backend responded with HTTP {status}")]
    Http { status: u16 },

    /// Request never completed or the body could not be decoded.
    #[error("scores backend request failed: {0}")]
    Network(String),
}

impl FetchError {
    pub fn network(err: impl std::fmt::Display) -> Self {
        FetchError::Network(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait ScoreSource: Send + Sync {
    fn source_name(&self) -> &'static str;

    async fn fetch_scores(&self, symbols: &[String]) -> Result<Vec<ScoreRecord>, FetchError>;
}
