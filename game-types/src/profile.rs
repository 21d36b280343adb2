use std::collections::HashMap;

use serde::Serialize;

use crate::COLS;

/// Letter usage aggregated over every historical guess. Derived on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct GuessProfile {
    pub letter_counts: HashMap<char, u32>,
    pub position_counts: [HashMap<char, u32>; COLS],
    pub total_guesses: u32,
}

impl GuessProfile {
    pub fn letter_count(&self, letter: char) -> u32 {
        self.letter_counts.get(&letter).copied().unwrap_or(0)
    }

    pub fn position_count(&self, position: usize, letter: char) -> u32 {
        self.position_counts
            .get(position)
            .and_then(|counts| counts.get(&letter))
            .copied()
            .unwrap_or(0)
    }
}
