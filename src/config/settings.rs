use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub target: TargetSettings,
    pub checker: CheckerSettings,
    pub leaderboard: LeaderboardSettings,
    pub reveal: RevealSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    pub name: String,
    pub version: String,
    pub log_level: String,
}

/// The account a handle must follow to be eligible.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSettings {
    pub handle: String,
    /// Shown as the call-to-action when a check is denied.
    pub profile_url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CheckerKind {
    Api,
    Proxy,
    Manual,
}

impl CheckerKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckerKind::Api => "api",
            CheckerKind::Proxy => "proxy",
            CheckerKind::Manual => "manual",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "api" => Some(CheckerKind::Api),
            "proxy" => Some(CheckerKind::Proxy),
            "manual" => Some(CheckerKind::Manual),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerSettings {
    pub kind: CheckerKind,
    pub api_base_url: String,
    /// Bearer token for the direct API checker. Usually supplied via the
    /// PRESENT_CHECK_CHECKER__BEARER_TOKEN environment variable.
    pub bearer_token: String,
    pub proxy_base_url: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaderboardSettings {
    pub path: String,
    pub key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevealSettings {
    /// Seconds the reveal stays on screen before the leaderboard shows.
    pub delay_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            app: AppSettings {
                name: "Present Checker".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                log_level: "info".to_string(),
            },
            target: TargetSettings {
                handle: "tobiasfib".to_string(),
                profile_url: "https://twitter.com/tobiasfib".to_string(),
            },
            checker: CheckerSettings {
                kind: CheckerKind::Manual,
                api_base_url: "https://api.twitter.com".to_string(),
                bearer_token: String::new(),
                proxy_base_url: String::new(),
                timeout_seconds: 10,
                max_retries: 2,
            },
            leaderboard: LeaderboardSettings {
                path: "present_leaderboard.json".to_string(),
                key: "leaderboard".to_string(),
            },
            reveal: RevealSettings { delay_seconds: 5 },
        }
    }
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(config::Environment::with_prefix("PRESENT_CHECK").separator("__"))
            .build()?;

        s.try_deserialize()
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(Config::try_from(&Settings::default())?)
            .add_source(File::from(path.as_ref()))
            .build()?;

        s.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.target.handle.trim().is_empty() {
            return Err("Target handle must not be empty".to_string());
        }
        if self.checker.timeout_seconds == 0 {
            return Err("Checker timeout must be positive".to_string());
        }
        if self.reveal.delay_seconds == 0 {
            return Err("Reveal delay must be positive".to_string());
        }
        match self.checker.kind {
            CheckerKind::Api if self.checker.bearer_token.trim().is_empty() => {
                Err("The api checker requires a bearer token".to_string())
            }
            CheckerKind::Proxy if self.checker.proxy_base_url.trim().is_empty() => {
                Err("The proxy checker requires a base URL".to_string())
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_validate() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_api_checker_requires_token() {
        let mut settings = Settings::default();
        settings.checker.kind = CheckerKind::Api;
        assert!(settings.validate().is_err());

        settings.checker.bearer_token = "token".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_proxy_checker_requires_url() {
        let mut settings = Settings::default();
        settings.checker.kind = CheckerKind::Proxy;
        assert!(settings.validate().is_err());

        settings.checker.proxy_base_url = "https://checker.example".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_checker_kind_parsing() {
        assert_eq!(CheckerKind::from_str("api"), Some(CheckerKind::Api));
        assert_eq!(CheckerKind::from_str("Proxy"), Some(CheckerKind::Proxy));
        assert_eq!(CheckerKind::from_str("MANUAL"), Some(CheckerKind::Manual));
        assert_eq!(CheckerKind::from_str("invalid"), None);
    }
}
