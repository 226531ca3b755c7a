//! Runtime configuration for a desk instance.
//!
//! # Responsibility
//! - Collect logging, storage and session knobs in one value.
//! - Resolve overrides from `MYDESK_*` environment variables.
//!
//! # Invariants
//! - `DeskConfig::default()` is always a valid, runnable configuration.
//! - Unparseable overrides are rejected, never silently ignored.

use crate::logging::{default_log_level, normalize_level};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::time::Duration;

pub const ENV_LOG_LEVEL: &str = "MYDESK_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "MYDESK_LOG_DIR";
pub const ENV_STORAGE_PATH: &str = "MYDESK_STORAGE_PATH";
pub const ENV_PROFILE_SAVE_DELAY_MS: &str = "MYDESK_PROFILE_SAVE_DELAY_MS";
pub const ENV_SEED_SAMPLE_DATA: &str = "MYDESK_SEED_SAMPLE_DATA";

/// Simulated round-trip of the profile save call.
pub const DEFAULT_PROFILE_SAVE_DELAY: Duration = Duration::from_millis(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    InvalidValue { key: &'static str, value: String },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { key, value } => {
                write!(f, "invalid value `{value}` for `{key}`")
            }
        }
    }
}

impl Error for ConfigError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeskConfig {
    pub log_level: String,
    /// File logging is skipped when unset.
    pub log_dir: Option<PathBuf>,
    /// SQLite file for the local storage mirror. `None` keeps it in memory.
    pub storage_path: Option<PathBuf>,
    pub profile_save_delay: Duration,
    /// Seed a fresh desk with the sample notes/links/tasks/folders.
    pub seed_sample_data: bool,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level().to_string(),
            log_dir: None,
            storage_path: None,
            profile_save_delay: DEFAULT_PROFILE_SAVE_DELAY,
            seed_sample_data: true,
        }
    }
}

impl DeskConfig {
    /// Defaults overridden by process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each key.
    ///
    /// Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let value_of = |key: &str| {
            lookup(key)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let mut config = Self::default();

        if let Some(raw) = value_of(ENV_LOG_LEVEL) {
            let level = normalize_level(&raw).map_err(|_| ConfigError::InvalidValue {
                key: ENV_LOG_LEVEL,
                value: raw.clone(),
            })?;
            config.log_level = level.to_string();
        }
        if let Some(dir) = value_of(ENV_LOG_DIR) {
            config.log_dir = Some(PathBuf::from(dir));
        }
        if let Some(path) = value_of(ENV_STORAGE_PATH) {
            config.storage_path = Some(PathBuf::from(path));
        }
        if let Some(raw) = value_of(ENV_PROFILE_SAVE_DELAY_MS) {
            let millis = raw.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                key: ENV_PROFILE_SAVE_DELAY_MS,
                value: raw.clone(),
            })?;
            config.profile_save_delay = Duration::from_millis(millis);
        }
        if let Some(raw) = value_of(ENV_SEED_SAMPLE_DATA) {
            config.seed_sample_data = parse_flag(&raw).ok_or(ConfigError::InvalidValue {
                key: ENV_SEED_SAMPLE_DATA,
                value: raw,
            })?;
        }

        Ok(config)
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::{
        ConfigError, DeskConfig, DEFAULT_PROFILE_SAVE_DELAY, ENV_LOG_LEVEL,
        ENV_PROFILE_SAVE_DELAY_MS, ENV_SEED_SAMPLE_DATA, ENV_STORAGE_PATH,
    };
    use std::collections::HashMap;
    use std::path::PathBuf;
    use std::time::Duration;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = DeskConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, DeskConfig::default());
        assert_eq!(config.profile_save_delay, DEFAULT_PROFILE_SAVE_DELAY);
        assert!(config.seed_sample_data);
    }

    #[test]
    fn overrides_are_applied_and_blank_values_ignored() {
        let config = DeskConfig::from_lookup(lookup_from(&[
            (ENV_STORAGE_PATH, " /tmp/desk.sqlite3 "),
            (ENV_PROFILE_SAVE_DELAY_MS, "25"),
            (ENV_SEED_SAMPLE_DATA, "off"),
            ("MYDESK_LOG_DIR", "   "),
        ]))
        .unwrap();

        assert_eq!(
            config.storage_path,
            Some(PathBuf::from("/tmp/desk.sqlite3"))
        );
        assert_eq!(config.profile_save_delay, Duration::from_millis(25));
        assert!(!config.seed_sample_data);
        assert_eq!(config.log_dir, None);
    }

    #[test]
    fn invalid_delay_is_rejected() {
        let err = DeskConfig::from_lookup(lookup_from(&[(ENV_PROFILE_SAVE_DELAY_MS, "soon")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_PROFILE_SAVE_DELAY_MS,
                value: "soon".to_string(),
            }
        );
    }

    #[test]
    fn log_level_is_normalized_or_rejected() {
        let config = DeskConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, " WARNING ")])).unwrap();
        assert_eq!(config.log_level, "warn");

        let err = DeskConfig::from_lookup(lookup_from(&[(ENV_LOG_LEVEL, "verbose")])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidValue {
                key: ENV_LOG_LEVEL,
                value: "verbose".to_string(),
            }
        );
    }
}
