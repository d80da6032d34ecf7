use std::sync::Arc;
use tokio::sync::Mutex;

use crate::config::AppConfig;
use crate::model::StorageError;
use crate::storage::SqliteStorage;

/// Shared state for all handlers. Market and announcement lookups re-read
/// the filesystem per request; only the card store is held open.
pub struct AppState {
    pub config: AppConfig,
    pub storage: Mutex<SqliteStorage>,
}

impl AppState {
    pub fn new(config: AppConfig, storage: SqliteStorage) -> Arc<Self> {
        Arc::new(Self {
            config,
            storage: Mutex::new(storage),
        })
    }

    pub fn from_config(config: AppConfig) -> Result<Arc<Self>, StorageError> {
        let storage = SqliteStorage::new(&config.database_path)?;
        Ok(Self::new(config, storage))
    }
}
