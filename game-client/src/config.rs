use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use game_persistence::connection::DEFAULT_DATABASE_URL;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    File,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sqlite" => Ok(StoreBackend::Sqlite),
            "file" => Ok(StoreBackend::File),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("unknown store backend '{}'", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub store_backend: StoreBackend,
    pub database_url: String,
    pub data_dir: PathBuf,
    pub word_check_timeout: Duration,
    pub validation_cache_capacity: usize,
    pub offline: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build a config from an arbitrary variable source. Unparseable values fall back to the default.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            store_backend: parse_or(&lookup, "WORD_GUESS_STORE", StoreBackend::File),
            database_url: lookup("DATABASE_URL").unwrap_or_else(|| DEFAULT_DATABASE_URL.to_string()),
            data_dir: lookup("WORD_GUESS_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("./.word-guess")),
            word_check_timeout: Duration::from_millis(parse_or(&lookup, "WORD_CHECK_TIMEOUT_MS", 2200)),
            validation_cache_capacity: parse_or(&lookup, "VALIDATION_CACHE_CAPACITY", 512),
            offline: parse_or(&lookup, "WORD_GUESS_OFFLINE", false),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_or<F, T>(lookup: &F, name: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!("Invalid {} value '{}', using default", name, raw);
            default
        }),
        None => default,
    }
}
