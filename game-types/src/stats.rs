use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::{Difficulty, ROWS};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum LearningState {
    Building, // Not enough guesses yet to personalize
    On,
}

impl LearningState {
    pub fn label(self) -> &'static str {
        match self {
            LearningState::Building => "Building",
            LearningState::On => "On",
        }
    }
}

/// Summary of the player's history shown alongside the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AggregateStats {
    pub games_played: u32,
    pub wins: u32,
    pub win_rate: f64,
    pub win_rate_percent: u32,
    pub mode: Difficulty,
    pub learning_state: LearningState,
    pub total_guesses: u32,
    pub starter: Option<String>,
    pub current_streak: u32,
    pub distribution: [u32; ROWS], // wins by number of attempts
}

impl AggregateStats {
    /// One-line summary in the format of the status bar.
    pub fn summary_line(&self) -> String {
        format!(
            "Games: {} | Win rate: {}% | Mode: {} | Learn: {} ({}) | Starter: {}",
            self.games_played,
            self.win_rate_percent,
            self.mode.label(),
            self.learning_state.label(),
            self.total_guesses,
            self.starter.as_deref().unwrap_or("-"),
        )
    }
}
