use game_types::{AggregateStats, Difficulty, GameRecord, LearningState, ROWS};

use crate::{SelectionPolicy, build_profile, most_frequent_starter};

/// Fewer games than this always play in normal mode.
pub const MIN_GAMES_FOR_HARD: usize = 8;
/// Win rate that must be strictly exceeded to switch to hard mode.
pub const HARD_WIN_RATE_THRESHOLD: f64 = 0.65;

/// Fraction of games won, 0 for an empty history
pub fn win_rate(games: &[GameRecord]) -> f64 {
    if games.is_empty() {
        return 0.0;
    }
    let wins = games.iter().filter(|game| game.won).count();
    wins as f64 / games.len() as f64
}

pub fn is_hard_mode(games: &[GameRecord]) -> bool {
    if games.len() < MIN_GAMES_FOR_HARD {
        return false;
    }
    win_rate(games) > HARD_WIN_RATE_THRESHOLD
}

pub fn classify_difficulty(games: &[GameRecord]) -> Difficulty {
    Difficulty::from_hard_mode(is_hard_mode(games))
}

/// Consecutive wins counted back from the most recent game
pub fn current_win_streak(games: &[GameRecord]) -> u32 {
    games.iter().rev().take_while(|game| game.won).count() as u32
}

/// Wins bucketed by the number of rows used. Records with out-of-range attempts are ignored.
pub fn win_distribution(games: &[GameRecord]) -> [u32; ROWS] {
    let mut totals = [0; ROWS];
    for game in games.iter().filter(|game| game.won) {
        let attempts = game.attempts as usize;
        if (1..=ROWS).contains(&attempts) {
            totals[attempts - 1] += 1;
        }
    }
    totals
}

pub fn compute_aggregate_stats(games: &[GameRecord], policy: &SelectionPolicy) -> AggregateStats {
    let games_played = games.len() as u32;
    let wins = games.iter().filter(|game| game.won).count() as u32;
    let rate = win_rate(games);
    let profile = build_profile(games);

    let learning_state = if profile.total_guesses >= policy.min_guesses_for_profile_model {
        LearningState::On
    } else {
        LearningState::Building
    };

    AggregateStats {
        games_played,
        wins,
        win_rate: rate,
        win_rate_percent: (rate * 100.0).round() as u32,
        mode: classify_difficulty(games),
        learning_state,
        total_guesses: profile.total_guesses,
        starter: most_frequent_starter(games),
        current_streak: current_win_streak(games),
        distribution: win_distribution(games),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn games(wins: usize, losses: usize) -> Vec<GameRecord> {
        let mut games = Vec::new();
        for _ in 0..wins {
            games.push(GameRecord::new(true, 3, "APPLE".to_string(), vec![], String::new()));
        }
        for _ in 0..losses {
            games.push(GameRecord::new(false, 6, "APPLE".to_string(), vec![], String::new()));
        }
        games
    }

    #[test]
    fn test_few_games_never_hard() {
        for played in 0..MIN_GAMES_FOR_HARD {
            assert!(!is_hard_mode(&games(played, 0)), "{} straight wins", played);
        }
    }

    #[test]
    fn test_high_win_rate_is_hard() {
        assert!(is_hard_mode(&games(8, 0)));
        assert!(is_hard_mode(&games(7, 3)));
        assert_eq!(classify_difficulty(&games(7, 3)), Difficulty::Hard);
    }

    #[test]
    fn test_threshold_is_strict() {
        // 13 / 20 is exactly 0.65
        let history = games(13, 7);
        assert_eq!(win_rate(&history), 0.65);
        assert!(!is_hard_mode(&history));

        assert!(is_hard_mode(&games(14, 6)));
        assert!(!is_hard_mode(&games(4, 4)));
    }

    #[test]
    fn test_win_rate_empty() {
        assert_eq!(win_rate(&[]), 0.0);
    }

    #[test]
    fn test_streak_and_distribution() {
        let mut history = games(0, 2);
        history.push(GameRecord::new(true, 1, "APPLE".to_string(), vec![], String::new()));
        history.push(GameRecord::new(true, 4, "APPLE".to_string(), vec![], String::new()));
        history.push(GameRecord::new(true, 4, "APPLE".to_string(), vec![], String::new()));
        history.push(GameRecord::new(true, 9, "APPLE".to_string(), vec![], String::new()));

        assert_eq!(current_win_streak(&history), 4);
        assert_eq!(win_distribution(&history), [1, 0, 0, 2, 0, 0]);

        history.push(GameRecord::new(false, 6, "APPLE".to_string(), vec![], String::new()));
        assert_eq!(current_win_streak(&history), 0);
    }

    #[test]
    fn test_aggregate_stats() {
        let mut history = games(2, 1);
        history[0].guesses = vec!["CRANE".to_string(), "APPLE".to_string()];
        history[0].starter = "CRANE".to_string();

        let stats = compute_aggregate_stats(&history, &SelectionPolicy::default());
        assert_eq!(stats.games_played, 3);
        assert_eq!(stats.wins, 2);
        assert_eq!(stats.win_rate_percent, 67);
        assert_eq!(stats.mode, Difficulty::Normal);
        assert_eq!(stats.learning_state, LearningState::Building);
        assert_eq!(stats.total_guesses, 2);
        assert_eq!(stats.starter.as_deref(), Some("CRANE"));
        assert_eq!(
            stats.summary_line(),
            "Games: 3 | Win rate: 67% | Mode: Normal | Learn: Building (2) | Starter: CRANE"
        );
    }

    #[test]
    fn test_aggregate_stats_empty_history() {
        let stats = compute_aggregate_stats(&[], &SelectionPolicy::default());
        assert_eq!(stats.games_played, 0);
        assert_eq!(stats.win_rate_percent, 0);
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.starter, None);
        assert!(stats.summary_line().ends_with("Starter: -"));
    }
}
