use crate::config::Settings;
use crate::domain::score::ScoreRecord;
use crate::scores::{FetchError, ScoreSource};
use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const GET_SCORES_PATH: &str = "/api/get-scores";

#[derive(Debug, Clone)]
pub struct HttpScoreClient {
    http: reqwest::Client,
    base_url: String,
}

impl HttpScoreClient {
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let base_url = base_url.into();
        anyhow::ensure!(
            !base_url.trim().is_empty(),
            "scores API base URL must be non-empty"
        );

        // No timeout: a slow backend keeps the dashboard in its loading state.
        let http = reqwest::Client::builder()
            .build()
            .context("failed to build scores http client")?;

        Ok(Self { http, base_url })
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        Self::new(settings.scores_api_base_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GET_SCORES_PATH)
    }
}

#[derive(Debug, Serialize)]
struct GetScoresRequest<'a> {
    symbols: &'a [String],
}

#[derive(Debug, Deserialize)]
struct GetScoresResponse {
    #[serde(default)]
    scores: Option<Vec<ScoreRecord>>,
}

#[async_trait::async_trait]
impl ScoreSource for HttpScoreClient {
    fn source_name(&self) -> &'static str {
        "http_json"
    }

    async fn fetch_scores(&self, symbols: &[String]) -> Result<Vec<ScoreRecord>, FetchError> {
        let res = self
            .http
            .post(self.url())
            .json(&GetScoresRequest { symbols })
            .send()
            .await
            .map_err(FetchError::network)?;

        let status = res.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
            });
        }

        let body = res
            .json::<GetScoresResponse>()
            .await
            .map_err(FetchError::network)?;

        let scores = body.scores.unwrap_or_default();
        tracing::debug!(
            requested = symbols.len(),
            received = scores.len(),
            "scores fetched"
        );
        Ok(scores)
    }
}
