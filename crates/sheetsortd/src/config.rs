//! Configuration management for sheetsortd.
//!
//! Settings come from /etc/sheetsort/config.toml with per-field defaults;
//! secrets are only ever read from the environment. A missing or malformed
//! config file is not an error, but a missing Sheets access token is: the
//! daemon refuses to start without a usable store credential.

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Config file path
pub const CONFIG_PATH: &str = "/etc/sheetsort/config.toml";

/// Environment variable holding the Gemini API key.
pub const GEMINI_API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable holding the Sheets OAuth access token.
pub const SHEETS_TOKEN_ENV: &str = "SHEETS_ACCESS_TOKEN";

/// LLM configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Primary classification model
    #[serde(default = "default_primary_model")]
    pub primary_model: String,

    /// Model retried once when the primary hits its quota.
    /// May legitimately equal the primary.
    #[serde(default = "default_fallback_model")]
    pub fallback_model: String,

    /// Request timeout in seconds
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_primary_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_fallback_model() -> String {
    "gemini-1.5-flash-8b".to_string()
}

fn default_llm_timeout() -> u64 {
    30
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            primary_model: default_primary_model(),
            fallback_model: default_fallback_model(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Google Sheets configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetsConfig {
    /// Spreadsheet all rows land in
    #[serde(default = "default_spreadsheet_id")]
    pub spreadsheet_id: String,

    /// Request timeout in seconds
    #[serde(default = "default_sheets_timeout")]
    pub timeout_secs: u64,
}

fn default_spreadsheet_id() -> String {
    "1wWktmD3QEHIlV9ct_NH_i0UQ5ceyxMrMTTidihBmoSU".to_string()
}

fn default_sheets_timeout() -> u64 {
    15
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_id: default_spreadsheet_id(),
            timeout_secs: default_sheets_timeout(),
        }
    }
}

/// Daemon configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default)]
    pub llm: LlmConfig,

    #[serde(default)]
    pub sheets: SheetsConfig,
}

fn default_bind_addr() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            llm: LlmConfig::default(),
            sheets: SheetsConfig::default(),
        }
    }
}

impl Config {
    /// Load config from the default path, falling back to defaults.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_PATH))
    }

    /// Load config from an explicit path, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Invalid config at {}: {}. Using defaults.", path.display(), e);
                    Config::default()
                }
            },
            Err(_) => {
                info!("No config at {}, using defaults", path.display());
                Config::default()
            }
        }
    }
}

/// Secrets resolved from the environment at startup.
#[derive(Debug, Clone)]
pub struct Secrets {
    /// Gemini API key. Absent is tolerated: classification then always
    /// degrades to the default category.
    pub gemini_api_key: Option<String>,

    /// Sheets access token. Absent is fatal.
    pub sheets_token: String,
}

impl Secrets {
    /// Read secrets from the environment.
    pub fn from_env() -> Result<Self> {
        let gemini_api_key = std::env::var(GEMINI_API_KEY_ENV).ok().filter(|k| !k.is_empty());
        if gemini_api_key.is_none() {
            warn!(
                "{} not set: every post will be filed under the default category",
                GEMINI_API_KEY_ENV
            );
        }

        let sheets_token = match std::env::var(SHEETS_TOKEN_ENV) {
            Ok(t) if !t.is_empty() => t,
            _ => bail!("{} not set; refusing to start without a store credential", SHEETS_TOKEN_ENV),
        };

        Ok(Self {
            gemini_api_key,
            sheets_token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.llm.primary_model, "gemini-1.5-flash");
        assert_eq!(config.sheets.timeout_secs, 15);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = Config::load_from(Path::new("/nonexistent/config.toml"));
        assert_eq!(config.bind_addr, "0.0.0.0:8000");
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let config: Config = toml::from_str("bind_addr = \"127.0.0.1:9000\"").unwrap();
        assert_eq!(config.bind_addr, "127.0.0.1:9000");
        assert_eq!(config.llm.timeout_secs, 30);
    }
}
