use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::COLS;

/// Per-letter result of comparing a guess against the answer.
pub type Evaluation = [LetterStatus; COLS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum LetterStatus {
    Correct, // Green - correct letter in correct position
    Present, // Yellow - correct letter in wrong position
    Absent,  // Gray - letter not in word
}

impl LetterStatus {
    /// Keyboard precedence: a key never downgrades once a stronger status is known.
    pub fn priority(self) -> u8 {
        match self {
            LetterStatus::Absent => 1,
            LetterStatus::Present => 2,
            LetterStatus::Correct => 3,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum RoundStatus {
    InProgress,
    Won,
    Lost,
}

impl RoundStatus {
    pub fn is_over(self) -> bool {
        !matches!(self, RoundStatus::InProgress)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Difficulty {
    Normal,
    Hard,
}

impl Difficulty {
    pub fn from_hard_mode(hard_mode: bool) -> Self {
        if hard_mode {
            Difficulty::Hard
        } else {
            Difficulty::Normal
        }
    }

    pub fn is_hard(self) -> bool {
        matches!(self, Difficulty::Hard)
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
        }
    }
}

/// A candidate answer paired with its profile score; only lives during selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub word: String,
    pub score: f64,
}
