use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::checker::{FollowChecker, FollowCheckerConfig};
use crate::models::{PresentCheckError, Result};

/// Direct social-API follow lookup with bearer auth.
pub struct ApiFollowChecker {
    client: reqwest::Client,
    base_url: String,
    bearer_token: String,
    config: FollowCheckerConfig,
}

#[derive(Debug, Deserialize)]
struct FollowLookupResponse {
    data: Option<FollowLookupData>,
}

#[derive(Debug, Deserialize)]
struct FollowLookupData {
    #[serde(default)]
    following: bool,
}

impl ApiFollowChecker {
    pub fn new(
        base_url: impl Into<String>,
        bearer_token: impl Into<String>,
        config: FollowCheckerConfig,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer_token: bearer_token.into(),
            config,
        })
    }

    async fn lookup(&self, handle: &str) -> Result<bool> {
        let url = format!(
            "{}/2/users/by/username/{}/following?target_username={}",
            self.base_url, handle, self.config.target_handle
        );
        let response: FollowLookupResponse = self
            .client
            .get(&url)
            .bearer_auth(&self.bearer_token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        // An absent data object means the relationship could not be
        // established for this handle; treat it as not-following.
        Ok(response.data.map(|d| d.following).unwrap_or(false))
    }
}

#[async_trait]
impl FollowChecker for ApiFollowChecker {
    fn name(&self) -> &'static str {
        "api"
    }

    async fn is_following(&self, handle: &str) -> Result<bool> {
        let mut last_err = None;
        for attempt in 0..=self.config.max_retries {
            match self.lookup(handle).await {
                Ok(following) => {
                    debug!(handle, following, "follow lookup succeeded");
                    return Ok(following);
                }
                Err(e) => {
                    warn!(handle, attempt, error = %e, "follow lookup failed");
                    last_err = Some(e);
                }
            }
        }
        Err(PresentCheckError::FollowCheckFailed {
            checker: self.name().to_string(),
            message: last_err
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no attempts made".to_string()),
        })
    }
}
