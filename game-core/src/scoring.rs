use game_types::{COLS, Evaluation, GuessProfile, LetterStatus};
use std::collections::{HashMap, HashSet};

pub struct ScoringEngine;

impl ScoringEngine {
    /// Evaluate a guess against the answer, handling repeated letters the Wordle way:
    /// exact matches claim their letter first, the rest are present only while unclaimed copies remain.
    pub fn evaluate_guess(guess: &str, answer: &str) -> Evaluation {
        let guess_chars: Vec<char> = guess.to_uppercase().chars().collect();
        let answer_chars: Vec<char> = answer.to_uppercase().chars().collect();

        let mut result = [LetterStatus::Absent; COLS];

        // Count frequency of each letter in the answer for handling duplicates
        let mut remaining: HashMap<char, u32> = HashMap::new();
        for ch in answer_chars.iter().take(COLS) {
            *remaining.entry(*ch).or_insert(0) += 1;
        }

        // First pass: mark correct positions
        for i in 0..COLS {
            if let (Some(g), Some(a)) = (guess_chars.get(i), answer_chars.get(i)) {
                if g == a {
                    result[i] = LetterStatus::Correct;
                    if let Some(count) = remaining.get_mut(g) {
                        *count -= 1;
                    }
                }
            }
        }

        // Second pass: mark present letters
        for i in 0..COLS {
            if result[i] == LetterStatus::Correct {
                continue;
            }
            let Some(ch) = guess_chars.get(i) else {
                continue;
            };
            if let Some(count) = remaining.get_mut(ch) {
                if *count > 0 {
                    result[i] = LetterStatus::Present;
                    *count -= 1;
                }
            }
        }

        result
    }

    pub fn is_solved(evaluation: &Evaluation) -> bool {
        evaluation.iter().all(|status| *status == LetterStatus::Correct)
    }

    /// Score a candidate answer against the player's profile and favourite starter.
    ///
    /// Normal mode rewards words that overlap the starter and the letters the player
    /// habitually types. Hard mode inverts that: it rewards words the player's habits
    /// miss and adds a bonus for repeated letters.
    pub fn score_candidate(word: &str, starter: &str, profile: &GuessProfile, hard_mode: bool) -> f64 {
        let letters: Vec<char> = word.chars().collect();
        let starter_letters: HashSet<char> = starter.chars().collect();
        let unique: HashSet<char> = letters.iter().copied().collect();

        let shared = unique.iter().filter(|ch| starter_letters.contains(ch)).count() as f64;
        let unique_letters = unique.len() as f64;
        let has_duplicate = if unique.len() < COLS { 1.0 } else { 0.0 };

        // Summed per slot: a repeated letter contributes its count once for each occurrence.
        let mut letter_affinity = 0.0;
        let mut position_affinity = 0.0;
        for (i, ch) in letters.iter().take(COLS).enumerate() {
            letter_affinity += f64::from(profile.letter_count(*ch));
            position_affinity += f64::from(profile.position_count(i, *ch));
        }

        let cols = COLS as f64;
        if !hard_mode {
            return shared * 6.0 + letter_affinity * 1.2 + position_affinity * 2.2 + unique_letters;
        }

        let total = f64::from(profile.total_guesses);
        (cols - shared) * 7.0
            + (total * 0.35 - letter_affinity) * 1.3
            + (total * 0.2 - position_affinity) * 1.8
            + has_duplicate * 3.0
            + (cols - unique_letters)
    }
}
