use std::collections::HashSet;

use anyhow::{Result, anyhow};
use game_types::{COLS, Difficulty};

pub const EASY_WORDS: [&str; 40] = [
    "APPLE", "BRAIN", "CHAIR", "DREAM", "EARTH", "FLAME", "GRAPE", "HOUSE", "INDEX", "JELLY",
    "KNIFE", "LEMON", "MUSIC", "NURSE", "OCEAN", "PIZZA", "QUEEN", "RIVER", "SMILE", "TABLE",
    "UNITY", "VOICE", "WATER", "YEAST", "ZEBRA", "BRICK", "CLOUD", "DANCE", "EAGER", "FAITH",
    "GIANT", "HONEY", "IDEAL", "JUICE", "KOALA", "LIGHT", "MANGO", "NOBLE", "OPERA", "PARTY",
];

pub const HARD_WORDS: [&str; 30] = [
    "ABYSS", "CIVIC", "EPOXY", "FJORD", "GLYPH", "JAZZY", "KAYAK", "LYMPH", "NYMPH", "PIXEL",
    "QUARK", "RHYME", "SQUAD", "TOXIC", "VODKA", "WHARF", "XENON", "YACHT", "ZONAL", "WRYLY",
    "QUEUE", "BEEFY", "MUMMY", "FUZZY", "VIXEN", "WALTZ", "CRYPT", "CHYME", "BURLY", "VAPID",
];

/// Candidate answers for each difficulty plus the set of words accepted without a dictionary lookup.
#[derive(Debug, Clone)]
pub struct WordBank {
    easy: Vec<String>,
    hard: Vec<String>,
    known_words: HashSet<String>,
}

impl WordBank {
    /// The built-in easy and hard vocabularies.
    pub fn standard() -> Self {
        Self::from_lists(
            EASY_WORDS.iter().map(|w| w.to_string()).collect(),
            HARD_WORDS.iter().map(|w| w.to_string()).collect(),
        )
    }

    /// Build a bank from newline separated word lists. Blank lines and `#` comments are skipped,
    /// words are uppercased and anything that is not a five letter alphabetic word is dropped.
    pub fn from_word_lists(easy: &str, hard: &str) -> Result<Self> {
        let easy = parse_word_list(easy);
        let hard = parse_word_list(hard);

        if easy.is_empty() || hard.is_empty() {
            return Err(anyhow!(
                "Word lists must not be empty (easy: {}, hard: {})",
                easy.len(),
                hard.len()
            ));
        }

        Ok(Self::from_lists(easy, hard))
    }

    fn from_lists(easy: Vec<String>, hard: Vec<String>) -> Self {
        let known_words = easy.iter().chain(hard.iter()).cloned().collect();
        Self {
            easy,
            hard,
            known_words,
        }
    }

    pub fn easy(&self) -> &[String] {
        &self.easy
    }

    pub fn hard(&self) -> &[String] {
        &self.hard
    }

    /// Answer pool for the given difficulty
    pub fn words_for(&self, difficulty: Difficulty) -> &[String] {
        match difficulty {
            Difficulty::Normal => &self.easy,
            Difficulty::Hard => &self.hard,
        }
    }

    /// Check if a word belongs to either vocabulary (case insensitive)
    pub fn is_known_word(&self, word: &str) -> bool {
        self.known_words.contains(&word.trim().to_uppercase())
    }

    /// Number of distinct words across both vocabularies
    pub fn known_word_count(&self) -> usize {
        self.known_words.len()
    }
}

impl Default for WordBank {
    fn default() -> Self {
        Self::standard()
    }
}

/// Check if word contains only ASCII letters
pub fn is_alphabetic(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_alphabetic())
}

fn parse_word_list(word_list: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    word_list
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(str::to_uppercase)
        .filter(|word| word.chars().count() == COLS && is_alphabetic(word))
        .filter(|word| seen.insert(word.clone()))
        .collect()
}
