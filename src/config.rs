//! Configuration types.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;
use crate::llm::{DEFAULT_MODEL, LlmConfig};

const DEFAULT_DB_PATH: &str = "./data/fittrack.db";
const DEFAULT_PAIRING_DELAY_MS: u64 = 1500;
const DEFAULT_SAMPLE_INTERVAL_MS: u64 = 3000;

/// Runtime configuration for the tracking core.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// libSQL database file.
    pub db_path: PathBuf,
    /// Simulated delay per paired device.
    pub pairing_delay: Duration,
    /// Live heart-rate/step sample interval.
    pub sample_interval: Duration,
    /// Coach LLM settings. `None` runs the coach on its fallback only.
    pub llm: Option<LlmConfig>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_PATH),
            pairing_delay: Duration::from_millis(DEFAULT_PAIRING_DELAY_MS),
            sample_interval: Duration::from_millis(DEFAULT_SAMPLE_INTERVAL_MS),
            llm: None,
        }
    }
}

impl AppConfig {
    /// Read configuration from environment variables.
    ///
    /// - `FITTRACK_DB_PATH` (default `./data/fittrack.db`)
    /// - `FITTRACK_PAIRING_DELAY_MS` (default 1500)
    /// - `FITTRACK_SAMPLE_INTERVAL_MS` (default 3000)
    /// - `ANTHROPIC_API_KEY` (optional)
    /// - `FITTRACK_MODEL` (default [`DEFAULT_MODEL`])
    /// - `FITTRACK_ANTHROPIC_BASE_URL` (optional)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("FITTRACK_DB_PATH")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_PATH));

        let pairing_delay = Duration::from_millis(parse_millis(
            &lookup,
            "FITTRACK_PAIRING_DELAY_MS",
            DEFAULT_PAIRING_DELAY_MS,
        )?);
        let sample_interval_ms = parse_millis(
            &lookup,
            "FITTRACK_SAMPLE_INTERVAL_MS",
            DEFAULT_SAMPLE_INTERVAL_MS,
        )?;
        if sample_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "FITTRACK_SAMPLE_INTERVAL_MS".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        let llm = lookup("ANTHROPIC_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .map(|key| LlmConfig {
                api_key: SecretString::from(key),
                model: lookup("FITTRACK_MODEL")
                    .filter(|m| !m.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                base_url: lookup("FITTRACK_ANTHROPIC_BASE_URL").filter(|u| !u.trim().is_empty()),
            });

        Ok(Self {
            db_path,
            pairing_delay,
            sample_interval: Duration::from_millis(sample_interval_ms),
            llm,
        })
    }
}

fn parse_millis<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue {
                key: key.to_string(),
                message: format!("{raw:?} is not a number of milliseconds: {e}"),
            }),
    }
}
