//! Storage configuration.
//!
//! The recognized options are `db_path` and `busy_timeout_ms`. Callers
//! usually hand over the whole service configuration mapping; keys this
//! crate does not know are ignored.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

use crate::{StorageError, StorageResult};

/// Store location used when `db_path` is absent or empty.
pub const DEFAULT_DB_PATH: &str = "./db/balancer.db";

/// Busy timeout used when `busy_timeout_ms` is absent.
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

const ENV_DB_PATH: &str = "BALANCER_DB_PATH";
const ENV_BUSY_TIMEOUT_MS: &str = "BALANCER_BUSY_TIMEOUT_MS";

/// Backend parameters for [`crate::Storage`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Filesystem location of the backing store.
    pub db_path: Option<PathBuf>,
    /// How long a connection waits for a locked store.
    pub busy_timeout_ms: u64,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            db_path: None,
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl StorageConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: Some(db_path.into()),
            ..Self::default()
        }
    }

    /// The effective store path, falling back to [`DEFAULT_DB_PATH`].
    #[must_use]
    pub fn db_path(&self) -> PathBuf {
        match &self.db_path {
            Some(path) if !path.as_os_str().is_empty() => path.clone(),
            _ => PathBuf::from(DEFAULT_DB_PATH),
        }
    }

    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }

    /// Builds a config from a string mapping such as `{"db_path": "./db/test.db"}`.
    pub fn from_options<I, K, V>(options: I) -> StorageResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut config = Self::default();
        for (key, value) in options {
            let (key, value) = (key.as_ref(), value.as_ref());
            match key {
                "db_path" => config.db_path = Some(PathBuf::from(value.trim())),
                "busy_timeout_ms" => config.busy_timeout_ms = parse_timeout(key, value)?,
                other => debug!(option = other, "Ignoring unrecognized storage option"),
            }
        }
        Ok(config)
    }

    /// Parses a JSON object; missing fields take their defaults.
    pub fn from_json(text: &str) -> StorageResult<Self> {
        serde_json::from_str(text).map_err(|e| StorageError::Config(e.to_string()))
    }

    /// Reads `BALANCER_DB_PATH` and `BALANCER_BUSY_TIMEOUT_MS`.
    pub fn from_env() -> StorageResult<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> StorageResult<Self> {
        let mut config = Self::default();
        if let Some(path) = lookup(ENV_DB_PATH) {
            config.db_path = Some(PathBuf::from(path));
        }
        if let Some(timeout) = lookup(ENV_BUSY_TIMEOUT_MS) {
            config.busy_timeout_ms = parse_timeout(ENV_BUSY_TIMEOUT_MS, &timeout)?;
        }
        Ok(config)
    }
}

fn parse_timeout(key: &str, value: &str) -> StorageResult<u64> {
    value
        .trim()
        .parse()
        .map_err(|e| StorageError::Config(format!("{key}={value:?}: {e}")))
}
