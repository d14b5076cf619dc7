use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::models::Result;

/// The follow-check collaborator: given a handle, does it follow the target
/// account. Implementations differ in how the answer is obtained (direct
/// API, third-party checker, manual confirmation); the flow only relies on
/// this boolean-or-error contract.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FollowChecker: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Whether `handle` follows the target account.
    async fn is_following(&self, handle: &str) -> Result<bool>;
}

/// Shared configuration for remote checkers.
#[derive(Debug, Clone)]
pub struct FollowCheckerConfig {
    pub target_handle: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}
