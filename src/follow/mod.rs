pub mod api;
pub mod checker;
pub mod manual;
pub mod proxy;

pub use api::ApiFollowChecker;
pub use checker::{FollowChecker, FollowCheckerConfig};
pub use manual::{ConfirmSender, ManualFollowChecker};
pub use proxy::ProxyFollowChecker;

#[cfg(test)]
pub use checker::MockFollowChecker;

use std::sync::Arc;

use crate::config::{CheckerKind, Settings};
use crate::models::Result;

/// Builds the configured checker. The manual kind prompts on the terminal;
/// UIs with their own confirmation dialog construct the channel variant
/// directly.
pub fn build_checker(settings: &Settings) -> Result<Arc<dyn FollowChecker>> {
    let config = FollowCheckerConfig {
        target_handle: settings.target.handle.clone(),
        timeout_seconds: settings.checker.timeout_seconds,
        max_retries: settings.checker.max_retries,
    };
    Ok(match settings.checker.kind {
        CheckerKind::Api => Arc::new(ApiFollowChecker::new(
            settings.checker.api_base_url.as_str(),
            settings.checker.bearer_token.as_str(),
            config,
        )?),
        CheckerKind::Proxy => Arc::new(ProxyFollowChecker::new(
            settings.checker.proxy_base_url.as_str(),
            config,
        )?),
        CheckerKind::Manual => Arc::new(ManualFollowChecker::interactive(
            settings.target.handle.clone(),
        )),
    })
}
