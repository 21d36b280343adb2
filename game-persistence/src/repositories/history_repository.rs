use std::sync::Arc;

use anyhow::Result;
use game_types::{GameHistory, GameRecord, HISTORY_CAP};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::store::KeyValueStore;

/// Key the history document is stored under.
pub const STORAGE_KEY: &str = "wordGuessStats";

/// Loads and saves the player's game history through a [`KeyValueStore`].
pub struct HistoryRepository {
    store: Arc<dyn KeyValueStore>,
    // Serializes read-modify-write appends within this process.
    append_lock: Mutex<()>,
}

impl HistoryRepository {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            append_lock: Mutex::new(()),
        }
    }

    /// Load the stored history. Missing, unreadable or malformed data yields an empty history.
    pub async fn load(&self) -> GameHistory {
        match self.store.get(STORAGE_KEY).await {
            Ok(Some(raw)) => decode_history(&raw),
            Ok(None) => GameHistory::default(),
            Err(e) => {
                tracing::warn!("Failed to read game history, starting empty: {:#}", e);
                GameHistory::default()
            }
        }
    }

    /// Replace the stored history, keeping only the most recent [`HISTORY_CAP`] games.
    pub async fn save(&self, history: &GameHistory) -> Result<()> {
        let start = history.games.len().saturating_sub(HISTORY_CAP);
        let capped = GameHistory::new(history.games[start..].to_vec());
        let raw = serde_json::to_string(&capped)?;
        self.store.set(STORAGE_KEY, &raw).await
    }

    /// Append a finished game and persist, dropping the oldest records beyond the cap.
    pub async fn append(&self, record: GameRecord) -> Result<GameHistory> {
        let _guard = self.append_lock.lock().await;

        let mut history = self.load().await;
        history.push_capped(record);
        self.save(&history).await?;

        tracing::debug!("Recorded game, history now holds {} games", history.len());
        Ok(history)
    }
}

/// Decode a stored history document leniently.
///
/// Anything other than an object with a `games` array decodes to an empty history.
/// Entries that are not objects are skipped; mistyped fields inside an entry take defaults.
pub fn decode_history(raw: &str) -> GameHistory {
    let document: Value = match serde_json::from_str(raw) {
        Ok(document) => document,
        Err(e) => {
            tracing::warn!("Stored game history is not valid JSON, starting empty: {}", e);
            return GameHistory::default();
        }
    };

    let Some(entries) = document.get("games").and_then(Value::as_array) else {
        tracing::warn!("Stored game history has no games list, starting empty");
        return GameHistory::default();
    };

    let games: Vec<GameRecord> = entries
        .iter()
        .filter(|entry| entry.is_object())
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect();

    if games.len() != entries.len() {
        tracing::debug!(
            "Skipped {} malformed game records",
            entries.len() - games.len()
        );
    }

    GameHistory::new(games)
}
