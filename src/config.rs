// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct RemoteConfig {
    pub base_url: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` means the platform data dir.
    pub db_path: Option<PathBuf>,
    pub user_id: String,
    pub remote: Option<RemoteConfig>,
    pub log_format: LogFormat,
}

pub const DEFAULT_USER: &str = "local";
const DEFAULT_TIMEOUT_SECS: u64 = 15;

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|k| std::env::var(k).ok())
    }

    pub fn from_lookup<F>(get: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |k: &str| get(k).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let db_path = non_empty("BUDGETWATCH_DB").map(PathBuf::from);
        let user_id = non_empty("BUDGETWATCH_USER").unwrap_or_else(|| DEFAULT_USER.to_string());

        let timeout_secs = match non_empty("BUDGETWATCH_HTTP_TIMEOUT_SECS") {
            Some(s) => s.parse::<u64>().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid HTTP timeout '{}' ({})", s, e))
            })?,
            None => DEFAULT_TIMEOUT_SECS,
        };
        if !(1..=300).contains(&timeout_secs) {
            return Err(ConfigError::InvalidConfig(
                "HTTP timeout must be between 1 and 300 seconds".to_string(),
            ));
        }

        let remote = match non_empty("BUDGETWATCH_REMOTE_URL") {
            Some(url) => {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(ConfigError::InvalidConfig(format!(
                        "Remote URL '{}' must start with http:// or https://",
                        url
                    )));
                }
                Some(RemoteConfig {
                    base_url: url.trim_end_matches('/').to_string(),
                    token: non_empty("BUDGETWATCH_REMOTE_TOKEN"),
                    timeout: Duration::from_secs(timeout_secs),
                })
            }
            None => None,
        };

        let log_format = match non_empty("BUDGETWATCH_LOG_FORMAT")
            .map(|s| s.to_lowercase())
            .as_deref()
        {
            None | Some("text") => LogFormat::Text,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(ConfigError::InvalidConfig(format!(
                    "Unknown log format '{}' (use text|json)",
                    other
                )));
            }
        };

        debug!(
            user_id = %user_id,
            remote = remote.is_some(),
            "configuration loaded"
        );
        Ok(AppConfig {
            db_path,
            user_id,
            remote,
            log_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|k| map.get(k).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let cfg = load(&[]).unwrap();
        assert!(cfg.db_path.is_none());
        assert_eq!(cfg.user_id, DEFAULT_USER);
        assert!(cfg.remote.is_none());
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn remote_url_is_normalized() {
        let cfg = load(&[
            ("BUDGETWATCH_REMOTE_URL", " https://store.example.com/v1/ "),
            ("BUDGETWATCH_REMOTE_TOKEN", "abc"),
            ("BUDGETWATCH_HTTP_TIMEOUT_SECS", "5"),
        ])
        .unwrap();
        let remote = cfg.remote.unwrap();
        assert_eq!(remote.base_url, "https://store.example.com/v1");
        assert_eq!(remote.token.as_deref(), Some("abc"));
        assert_eq!(remote.timeout, Duration::from_secs(5));
    }

    #[test]
    fn rejects_out_of_range_timeout() {
        assert!(load(&[("BUDGETWATCH_HTTP_TIMEOUT_SECS", "0")]).is_err());
        assert!(load(&[("BUDGETWATCH_HTTP_TIMEOUT_SECS", "abc")]).is_err());
    }

    #[test]
    fn rejects_unknown_log_format() {
        let err = load(&[("BUDGETWATCH_LOG_FORMAT", "xml")]).unwrap_err();
        assert!(err.to_string().contains("Unknown log format"));
        let cfg = load(&[("BUDGETWATCH_LOG_FORMAT", "JSON")]).unwrap();
        assert_eq!(cfg.log_format, LogFormat::Json);
    }
}
