use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use super::checker::{FollowChecker, FollowCheckerConfig};
use crate::models::{PresentCheckError, Result};

/// Follow lookup through a third-party checker endpoint. No auth; the
/// endpoint answers `{"following": bool}` for a handle/target pair.
pub struct ProxyFollowChecker {
    client: reqwest::Client,
    base_url: String,
    config: FollowCheckerConfig,
}

#[derive(Debug, Deserialize)]
struct ProxyCheckResponse {
    following: bool,
}

impl ProxyFollowChecker {
    pub fn new(base_url: impl Into<String>, config: FollowCheckerConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            config,
        })
    }

    async fn lookup(&self, handle: &str) -> Result<bool> {
        let url = format!("{}/check", self.base_url);
        let response: ProxyCheckResponse = self
            .client
            .get(&url)
            .query(&[("handle", handle), ("target", &self.config.target_handle)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.following)
    }
}

#[async_trait]
impl FollowChecker for ProxyFollowChecker {
    fn name(&self) -> &'static str {
        "proxy"
    }

    async fn is_following(&self, handle: &str) -> Result<bool> {
        let mut last_err = None;
        for attempt in 0..=self.config.max_retries {
            match self.lookup(handle).await {
                Ok(following) => {
                    debug!(handle, following, "proxy check succeeded");
                    return Ok(following);
                }
                Err(e) => {
                    warn!(handle, attempt, error = %e, "proxy check failed");
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_parsing() {
        let parsed: ProxyCheckResponse = serde_json::from_str(r#"{"following":true}"#).unwrap();
        assert!(parsed.following);
    }
}
