pub mod command;
pub mod config;
pub mod dictionary;
pub mod render;
pub mod session;

use std::sync::Arc;

use game_persistence::{
    DbErr, FileStore, KeyValueStore, MemoryStore, SqliteStore, connection::connect_and_migrate,
};
use game_types::GameError;
use thiserror::Error;

use crate::config::{Config, StoreBackend};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("database error: {0}")]
    Database(#[from] DbErr),
    #[error("terminal I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Game(#[from] GameError),
}

/// Open the history backend selected by `config`.
pub async fn open_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, ClientError> {
    let store: Arc<dyn KeyValueStore> = match config.store_backend {
        StoreBackend::Sqlite => {
            let db = connect_and_migrate(&config.database_url).await?;
            Arc::new(SqliteStore::new(db))
        }
        StoreBackend::File => {
            let store = FileStore::new(config.data_dir.clone());
            tracing::info!("Storing game history under {}", store.dir().display());
            Arc::new(store)
        }
        StoreBackend::Memory => Arc::new(MemoryStore::new()),
    };

    tracing::info!("Using {:?} history store", config.store_backend);
    Ok(store)
}
