//! HTTP client for the score service

use async_trait::async_trait;
use game_state::{GameMode, HighScoreRecord};
use reqwest::{Client as ReqwestClient, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{Result, ScoreClientError};

/// Source of high score records
///
/// `Ok(None)` means the service knows the user but has no record for the mode.
#[async_trait]
pub trait ScoreService: Send + Sync {
    /// Fetch the best record for `user_id` in `mode`
    async fn fetch_high_score(
        &self,
        user_id: &str,
        mode: GameMode,
    ) -> Result<Option<HighScoreRecord>>;
}

/// Score client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ScoreClientConfig {
    /// Base service URL (e.g., "https://flashback.example.com")
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ScoreClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3001".to_string(),
            timeout_secs: 10,
            user_agent: format!("FlashBack/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ScoreClientConfig {
    /// Create a new config with a base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_secs = timeout.as_secs().max(1);
        self
    }

    /// Set the user agent
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Request timeout
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// [`ScoreService`] backed by the FlashBack REST API
pub struct HttpScoreClient {
    client: ReqwestClient,
    config: ScoreClientConfig,
}

impl HttpScoreClient {
    /// Create a new client
    pub fn new(config: ScoreClientConfig) -> Result<Self> {
        let client = ReqwestClient::builder()
            .timeout(config.timeout())
            .user_agent(&config.user_agent)
            .build()
            .map_err(|e| ScoreClientError::Config(e.to_string()))?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &ScoreClientConfig {
        &self.config
    }

    fn high_score_url(&self, user_id: &str, mode: GameMode) -> String {
        format!(
            "{}/api/scores/{}/{}/high",
            self.config.base_url.trim_end_matches('/'),
            urlencoding::encode(user_id),
            mode.as_str()
        )
    }
}

#[async_trait]
impl ScoreService for HttpScoreClient {
    async fn fetch_high_score(
        &self,
        user_id: &str,
        mode: GameMode,
    ) -> Result<Option<HighScoreRecord>> {
        let url = self.high_score_url(user_id, mode);
        tracing::debug!(%url, "Fetching high score");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ScoreClientError::Network(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .text()
            .await
            .map_err(|e| ScoreClientError::Network(format!("Failed to read response: {}", e)))?;

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ScoreClientError::Unauthorized { status: status.as_u16(), message: body });
        }
        if !status.is_success() {
            return Err(ScoreClientError::Status { status: status.as_u16(), message: body });
        }

        parse_high_score(&body)
    }
}

/// The service answers `null`, an empty string or an empty body when the user
/// has no record yet.
fn parse_high_score(body: &str) -> Result<Option<HighScoreRecord>> {
    if body.trim().is_empty() {
        return Ok(None);
    }

    match serde_json::from_str::<serde_json::Value>(body)? {
        serde_json::Value::Null => Ok(None),
        serde_json::Value::String(s) if s.is_empty() => Ok(None),
        value => Ok(Some(serde_json::from_value(value)?)),
    }
}
