pub mod config;
pub mod flow;
pub mod follow;
pub mod leaderboard;
pub mod models;
pub mod reward;
pub mod tui;

pub use config::{CheckerKind, Settings};
pub use models::{CheckOutcome, PresentCheckError, Result, RewardResult, RewardTier};
