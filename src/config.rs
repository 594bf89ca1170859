//! Service configuration.
//!
//! Values come from, in increasing precedence: built-in defaults, an optional
//! TOML file, `RP_*` environment variables, command-line flags.
//!
//! ```toml
//! bind = "0.0.0.0:5007"
//! schedule_url = "http://schedule-service:5005"
//! tournament_url = "http://tournament-service:5002"
//! match_url = "http://match-service:5004"
//! notification_webhook = "https://chat.example.com/api/webhooks/123/abc"
//! ```

use std::net::SocketAddr;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! override_from {
    ($lookup:expr, $config:expr, $($key:expr => $field:ident),* $(,)?) => {{
        $(
            if let Some(value) = $lookup($key) {
                $config.$field = value;
            }
        )*
    }};
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid bind address '{0}'")]
    InvalidBind(String),

    #[error("Invalid URL for {key}: '{value}'")]
    InvalidUrl { key: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServiceConfig {
    /// Address the HTTP server listens on
    pub bind: String,
    /// Base URL of the schedule (availability) service
    pub schedule_url: String,
    /// Base URL of the tournament (standings) service
    pub tournament_url: String,
    /// Base URL of the match service
    pub match_url: String,
    /// Chat webhook for announcements; announcements are only logged when unset
    pub notification_webhook: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5007".to_string(),
            schedule_url: "http://localhost:5005".to_string(),
            tournament_url: "http://localhost:5002".to_string(),
            match_url: "http://localhost:5004".to_string(),
            notification_webhook: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse configuration from a TOML string; absent keys keep their defaults
    /// and unknown keys are rejected
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Apply `RP_*` environment variable overrides
    #[must_use]
    pub fn with_environment(self) -> Self {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    #[must_use]
    pub fn with_lookup<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        override_from!(
            lookup,
            self,
            "RP_BIND" => bind,
            "RP_SCHEDULE_URL" => schedule_url,
            "RP_TOURNAMENT_URL" => tournament_url,
            "RP_MATCH_URL" => match_url,
        );

        if let Some(webhook) = lookup("RP_NOTIFICATION_WEBHOOK") {
            self.notification_webhook = Some(webhook).filter(|w| !w.trim().is_empty());
        }

        self
    }

    /// Parsed bind address
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bind
            .parse()
            .map_err(|_| ConfigError::InvalidBind(self.bind.clone()))
    }

    /// Check every address and URL before anything is started
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.bind_addr()?;

        let mut urls = vec![
            ("schedule_url", self.schedule_url.as_str()),
            ("tournament_url", self.tournament_url.as_str()),
            ("match_url", self.match_url.as_str()),
        ];
        if let Some(webhook) = &self.notification_webhook {
            urls.push(("notification_webhook", webhook.as_str()));
        }

        for (key, value) in urls {
            let valid = reqwest::Url::parse(value)
                .is_ok_and(|url| matches!(url.scheme(), "http" | "https"));
            if !valid {
                return Err(ConfigError::InvalidUrl {
                    key,
                    value: value.to_string(),
                });
            }
        }

        Ok(())
    }
}
