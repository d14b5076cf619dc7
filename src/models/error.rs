use thiserror::Error;

#[derive(Error, Debug)]
pub enum PresentCheckError {
    #[error("Follow check failed on {checker}: {message}")]
    FollowCheckFailed { checker: String, message: String },

    #[error("@{handle} is not following @{target}")]
    NotFollowing { handle: String, target: String },

    #[error("@{handle} has already checked their presents")]
    DuplicateHandle { handle: String },

    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl PresentCheckError {
    /// Message shown to the user at the UI boundary. Errors not listed here
    /// fall back to their Display form.
    pub fn user_message(&self, target: &str) -> String {
        match self {
            PresentCheckError::NotFollowing { .. } => format!(
                "You need to follow @{} first to see how many presents you'll get! 🎅",
                target
            ),
            PresentCheckError::FollowCheckFailed { .. } | PresentCheckError::HttpError(_) => {
                "Oops! Something went wrong checking your X profile 😅".to_string()
            }
            PresentCheckError::DuplicateHandle { handle } => {
                format!("@{} already checked their presents! One check per handle 🎁", handle)
            }
            other => other.to_string(),
        }
    }

    /// Whether retrying the same check can succeed without user action.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PresentCheckError::FollowCheckFailed { .. } | PresentCheckError::HttpError(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, PresentCheckError>;
