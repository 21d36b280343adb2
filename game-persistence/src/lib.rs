pub mod connection;
pub mod entities;
pub mod repositories;
pub mod store;

pub use repositories::HistoryRepository;
pub use store::{FileStore, KeyValueStore, MemoryStore, SqliteStore};
pub use sea_orm::DbErr;
