use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::{mpsc, Mutex};

use super::checker::FollowChecker;
use crate::models::{PresentCheckError, Result};

/// Sends the user's yes/no confirmation into a channel-backed checker.
pub type ConfirmSender = mpsc::Sender<bool>;

enum AnswerSource {
    /// Prompt on the terminal and read one line from stdin.
    Terminal,
    /// Receive the answer from a UI that renders its own confirmation.
    Channel(Mutex<mpsc::Receiver<bool>>),
}

/// Manual confirmation "checker": the user themselves answers whether they
/// follow the target. The check suspends until the answer arrives.
pub struct ManualFollowChecker {
    target_handle: String,
    source: AnswerSource,
}

impl ManualFollowChecker {
    /// Terminal prompt variant for CLI use.
    pub fn interactive(target_handle: impl Into<String>) -> Self {
        Self {
            target_handle: target_handle.into(),
            source: AnswerSource::Terminal,
        }
    }

    /// Channel variant for UIs with their own confirmation dialog. The
    /// returned sender delivers the answer; dropping it fails the check.
    pub fn channel(target_handle: impl Into<String>) -> (Self, ConfirmSender) {
        let (tx, rx) = mpsc::channel(1);
        (
            Self {
                target_handle: target_handle.into(),
                source: AnswerSource::Channel(Mutex::new(rx)),
            },
            tx,
        )
    }
}

#[async_trait]
impl FollowChecker for ManualFollowChecker {
    fn name(&self) -> &'static str {
        "manual"
    }

    async fn is_following(&self, _handle: &str) -> Result<bool> {
        match &self.source {
            AnswerSource::Terminal => {
                println!("Do you follow @{}? [y/N]", self.target_handle);
                let mut line = String::new();
                let mut reader = BufReader::new(tokio::io::stdin());
                reader
                    .read_line(&mut line)
                    .await
                    .map_err(|e| PresentCheckError::FollowCheckFailed {
                        checker: "manual".to_string(),
                        message: e.to_string(),
                    })?;
                Ok(matches!(line.trim(), "y" | "Y" | "yes" | "Yes" | "YES"))
            }
            AnswerSource::Channel(rx) => {
                let mut rx = rx.lock().await;
                rx.recv()
                    .await
                    .ok_or_else(|| PresentCheckError::FollowCheckFailed {
                        checker: "manual".to_string(),
                        message: "confirmation channel closed".to_string(),
                    })
            }
        }
    }
}
