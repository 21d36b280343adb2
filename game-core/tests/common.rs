#![allow(dead_code)]

use game_core::{Input, RoundEvent, RoundState};
use game_types::{GameRecord, ROWS};

/// Creates a finished game record with the given guesses; the first guess is the starter
pub fn create_record(won: bool, answer: &str, guesses: &[&str]) -> GameRecord {
    let attempts = if won { guesses.len() } else { ROWS };
    GameRecord::new(
        won,
        attempts as u32,
        answer.to_string(),
        guesses.iter().map(|g| g.to_string()).collect(),
        guesses.first().map(|g| g.to_string()).unwrap_or_default(),
    )
}

/// History of `count` games that all open with CRANE and win on CRATE
pub fn create_crane_history(count: usize) -> Vec<GameRecord> {
    (0..count)
        .map(|_| create_record(true, "CRATE", &["CRANE", "CRATE"]))
        .collect()
}

/// History with a fixed number of wins followed by losses
pub fn create_history_with_results(wins: usize, losses: usize) -> Vec<GameRecord> {
    let mut games: Vec<GameRecord> = (0..wins)
        .map(|_| create_record(true, "APPLE", &["APPLE"]))
        .collect();
    games.extend((0..losses).map(|_| create_record(false, "APPLE", &["CRANE"])));
    games
}

pub fn to_bank(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| w.to_string()).collect()
}

/// Types a word and submits it as a dictionary word
pub fn submit_word(round: &mut RoundState, word: &str) -> RoundEvent {
    for ch in word.chars() {
        round.apply(Input::Letter(ch)).unwrap();
    }
    round.apply(Input::Submit { in_dictionary: true }).unwrap()
}
