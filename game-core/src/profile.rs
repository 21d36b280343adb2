use game_types::{COLS, GameRecord, GuessProfile};

/// Aggregate letter and letter-by-position frequencies over every historical guess.
///
/// Only guesses of exactly [`COLS`] characters are counted; anything else is skipped.
pub fn build_profile(games: &[GameRecord]) -> GuessProfile {
    let mut profile = GuessProfile::default();

    for guess in games.iter().flat_map(|game| game.guesses.iter()) {
        if guess.chars().count() != COLS {
            continue;
        }

        for (i, ch) in guess.to_uppercase().chars().take(COLS).enumerate() {
            *profile.letter_counts.entry(ch).or_insert(0) += 1;
            *profile.position_counts[i].entry(ch).or_insert(0) += 1;
        }
        profile.total_guesses += 1;
    }

    profile
}

/// The opening guess the player uses most often.
///
/// Ties go to the starter that appeared first in the history: a later word only takes
/// over with a strictly higher count.
pub fn most_frequent_starter(games: &[GameRecord]) -> Option<String> {
    // Insertion ordered so the tie-break follows first appearance.
    let mut counts: Vec<(String, u32)> = Vec::new();

    for game in games {
        let starter = game.starter.to_uppercase();
        if starter.chars().count() != COLS {
            continue;
        }
        match counts.iter_mut().find(|(word, _)| *word == starter) {
            Some((_, count)) => *count += 1,
            None => counts.push((starter, 1)),
        }
    }

    let mut best: Option<(String, u32)> = None;
    for (word, count) in counts {
        if best.as_ref().is_none_or(|(_, best_count)| count > *best_count) {
            best = Some((word, count));
        }
    }

    best.map(|(word, _)| word)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game_with(guesses: &[&str], starter: &str) -> GameRecord {
        GameRecord::new(
            false,
            guesses.len() as u32,
            "TABLE".to_string(),
            guesses.iter().map(|g| g.to_string()).collect(),
            starter.to_string(),
        )
    }

    #[test]
    fn test_empty_profile() {
        let profile = build_profile(&[]);

        assert_eq!(profile.total_guesses, 0);
        assert!(profile.letter_counts.is_empty());
        assert!(profile.position_counts.iter().all(|counts| counts.is_empty()));
    }

    #[test]
    fn test_repeated_guess_profile() {
        let games = vec![game_with(&["ABABA", "ABABA", "ABABA"], "ABABA"), game_with(&["ABABA", "ABABA"], "ABABA")];
        let profile = build_profile(&games);

        assert_eq!(profile.total_guesses, 5);
        assert_eq!(profile.letter_count('A'), 15);
        assert_eq!(profile.letter_count('B'), 10);
        assert_eq!(profile.position_count(0, 'A'), 5);
        assert_eq!(profile.position_count(1, 'B'), 5);
        assert_eq!(profile.position_count(1, 'A'), 0);
    }

    #[test]
    fn test_profile_skips_wrong_length_and_uppercases() {
        let games = vec![game_with(&["crane", "TOOLONG", "", "abc", "Slate"], "crane")];
        let profile = build_profile(&games);

        assert_eq!(profile.total_guesses, 2);
        assert_eq!(profile.letter_count('A'), 2);
        assert_eq!(profile.letter_count('E'), 2);
        assert_eq!(profile.letter_count('c'), 0);
        assert_eq!(profile.position_count(0, 'C'), 1);
        assert_eq!(profile.position_count(0, 'S'), 1);
        assert_eq!(profile.letter_count('O'), 0);
    }

    #[test]
    fn test_most_frequent_starter() {
        let games = vec![
            game_with(&["APPLE"], "APPLE"),
            game_with(&["APPLE"], "APPLE"),
            game_with(&["BRAIN"], "BRAIN"),
        ];
        assert_eq!(most_frequent_starter(&games), Some("APPLE".to_string()));
    }

    #[test]
    fn test_starter_tie_goes_to_first_seen() {
        let games = vec![
            game_with(&[], "BRAIN"),
            game_with(&[], "APPLE"),
            game_with(&[], "APPLE"),
            game_with(&[], "BRAIN"),
        ];
        assert_eq!(most_frequent_starter(&games), Some("BRAIN".to_string()));
    }

    #[test]
    fn test_starter_normalisation() {
        let games = vec![
            game_with(&[], "crane"),
            game_with(&[], "CRANE"),
            game_with(&[], "toolong"),
            game_with(&[], "toolong"),
            game_with(&[], "toolong"),
        ];
        assert_eq!(most_frequent_starter(&games), Some("CRANE".to_string()));
    }

    #[test]
    fn test_no_valid_starter() {
        assert_eq!(most_frequent_starter(&[]), None);

        let games = vec![game_with(&[], ""), game_with(&[], "ABC")];
        assert_eq!(most_frequent_starter(&games), None);
    }
}
