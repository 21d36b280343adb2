use serde::{Deserialize, Serialize};
use thiserror::Error;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum GameError {
    #[error("word bank is empty")]
    EmptyWordBank,
    #[error("word must be {expected} letters")]
    IncompleteGuess { expected: usize },
    #[error("not in dictionary: {word}")]
    NotInDictionary { word: String },
    #[error("round is already over")]
    RoundOver,
    #[error("invalid input: {input}")]
    InvalidInput { input: String },
}
