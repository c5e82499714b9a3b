//! Runtime configuration for the terminal game, read from environment variables.
//!
//! | variable | meaning | default |
//! |----------|---------|---------|
//! | `BLOCKFALL_SEED` | piece RNG seed | entropy |
//! | `BLOCKFALL_GRAVITY_MS` | gravity interval | 1000 |
//! | `BLOCKFALL_FRAME_MS` | frame period | 16 |
//! | `BLOCKFALL_LOG_PATH` | log file (empty disables logging) | `blockfall.log` |
//! | `BLOCKFALL_LOG` | tracing filter | `info` |

use std::path::PathBuf;
use std::time::Duration;

use derive_more::{Display, Error};

use crate::core::GameConfig;
use crate::types::{GRAVITY_INTERVAL_MS, TICK_MS};

pub const SEED_VAR: &str = "BLOCKFALL_SEED";
pub const GRAVITY_VAR: &str = "BLOCKFALL_GRAVITY_MS";
pub const FRAME_VAR: &str = "BLOCKFALL_FRAME_MS";
pub const LOG_PATH_VAR: &str = "BLOCKFALL_LOG_PATH";
pub const LOG_FILTER_VAR: &str = "BLOCKFALL_LOG";

const DEFAULT_LOG_PATH: &str = "blockfall.log";

/// A configuration variable held a value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum ConfigError {
    #[display("{var}: expected an unsigned integer, got {value:?}")]
    NotANumber {
        var: &'static str,
        value: String,
    },
    #[display("{var}: must be greater than zero")]
    Zero { var: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub seed: Option<u64>,
    pub gravity_interval_ms: u32,
    pub frame_ms: u32,
    pub log_path: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            seed: None,
            gravity_interval_ms: GRAVITY_INTERVAL_MS,
            frame_ms: TICK_MS,
            log_path: Some(PathBuf::from(DEFAULT_LOG_PATH)),
        }
    }
}

impl AppConfig {
    /// Read from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Read through an arbitrary variable lookup; unset and blank values take defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = get(SEED_VAR) {
            config.seed = Some(parse_number(SEED_VAR, &raw)?);
        }
        if let Some(raw) = get(GRAVITY_VAR) {
            config.gravity_interval_ms = parse_positive(GRAVITY_VAR, &raw)?;
        }
        if let Some(raw) = get(FRAME_VAR) {
            config.frame_ms = parse_positive(FRAME_VAR, &raw)?;
        }
        if let Some(raw) = lookup(LOG_PATH_VAR) {
            let raw = raw.trim();
            config.log_path = (!raw.is_empty()).then(|| PathBuf::from(raw));
        }

        Ok(config)
    }

    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            gravity_interval_ms: self.gravity_interval_ms,
            seed: self.seed,
        }
    }

    pub fn frame_duration(&self) -> Duration {
        Duration::from_millis(self.frame_ms as u64)
    }
}

fn parse_number<T: std::str::FromStr>(var: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::NotANumber {
        var,
        value: raw.to_string(),
    })
}

fn parse_positive(var: &'static str, raw: &str) -> Result<u32, ConfigError> {
    match parse_number(var, raw)? {
        0 => Err(ConfigError::Zero { var }),
        n => Ok(n),
    }
}
