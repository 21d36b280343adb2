use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use ts_rs::TS;

/// Maximum number of game records kept in the persisted history.
pub const HISTORY_CAP: usize = 250;

/// One completed round. Created once at round end and never modified.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[serde(default)]
#[ts(export)]
pub struct GameRecord {
    #[serde(deserialize_with = "lenient_date")]
    pub date: DateTime<Utc>, // ISO 8601 string on the wire
    #[serde(deserialize_with = "lenient_bool")]
    pub won: bool,
    #[serde(deserialize_with = "lenient_count")]
    pub attempts: u32,
    #[serde(deserialize_with = "lenient_string")]
    pub answer: String,
    #[serde(deserialize_with = "lenient_guesses")]
    pub guesses: Vec<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub starter: String,
}

impl GameRecord {
    pub fn new(won: bool, attempts: u32, answer: String, guesses: Vec<String>, starter: String) -> Self {
        Self {
            date: Utc::now(),
            won,
            attempts,
            answer,
            guesses,
            starter,
        }
    }
}

/// Chronological list of past games, most recent last.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct GameHistory {
    pub games: Vec<GameRecord>,
}

impl GameHistory {
    pub fn new(games: Vec<GameRecord>) -> Self {
        Self { games }
    }

    pub fn len(&self) -> usize {
        self.games.len()
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    /// Append a record and drop the oldest entries beyond [`HISTORY_CAP`].
    pub fn push_capped(&mut self, record: GameRecord) {
        self.games.push(record);
        if self.games.len() > HISTORY_CAP {
            let excess = self.games.len() - HISTORY_CAP;
            self.games.drain(..excess);
        }
    }
}

// A field of the wrong type reads as its default; the rest of the record is kept.

fn lenient_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|raw| DateTime::parse_from_rfc3339(raw).ok())
        .map(|date| date.with_timezone(&Utc))
        .unwrap_or_default())
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_bool().unwrap_or_default())
}

/// Non-negative integers only; `"3"` or `2.5` read as 0.
fn lenient_count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value
        .as_u64()
        .and_then(|count| u32::try_from(count).ok())
        .unwrap_or_default())
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::String(text) => text,
        _ => String::new(),
    })
}

/// Keeps the string entries of a guess list; anything else in the array is dropped.
fn lenient_guesses<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                serde_json::Value::String(guess) => Some(guess),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    })
}
