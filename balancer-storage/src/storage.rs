//! Configuration-driven factory for writer and reader handles.

use balancer_db::Database;
use tracing::debug;

use crate::{Reader, StorageConfig, StorageResult, Writer};

/// Entry point of the persistence core.
///
/// Holds only configuration. Every [`Storage::get_writer`] and
/// [`Storage::get_reader`] call opens its own connection to the configured
/// store, so handles can be created per request and dropped afterwards.
#[derive(Debug, Clone, Default)]
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    #[must_use]
    pub fn new(config: StorageConfig) -> Self {
        Self { config }
    }

    /// Builds storage from a string option mapping (`{"db_path": ...}`).
    pub fn from_options<I, K, V>(options: I) -> StorageResult<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        Ok(Self::new(StorageConfig::from_options(options)?))
    }

    #[must_use]
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    pub fn get_writer(&self) -> StorageResult<Writer> {
        Ok(Writer::new(self.open()?))
    }

    pub fn get_reader(&self) -> StorageResult<Reader> {
        Ok(Reader::new(self.open()?))
    }

    fn open(&self) -> StorageResult<Database> {
        let path = self.config.db_path();
        debug!(path = %path.display(), "Opening storage handle");
        Ok(Database::open(&path, self.config.busy_timeout())?)
    }
}
