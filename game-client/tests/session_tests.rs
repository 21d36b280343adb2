
use std::sync::Arc;

use game_client::session::Key;
use game_core::RoundEvent;
use game_persistence::FileStore;
use game_types::{Difficulty, GameError, LearningState, RoundStatus};
use test_helpers::*;
use tokio_test::{assert_err, assert_ok};

#[tokio::test]
async fn test_cold_start_uses_easy_bank() {
    let setup = TestSessionSetup::new().await;

    let round = setup.session.round();
    assert_eq!(round.answer(), EASY_ANSWER);
    assert_eq!(round.difficulty(), Difficulty::Normal);
    assert_eq!(round.status(), RoundStatus::InProgress);
}

#[tokio::test]
async fn test_winning_round_is_recorded() {
    let mut setup = TestSessionSetup::new().await;

    let event = assert_ok!(setup.session.submit_word("CRANE").await);
    assert!(matches!(event, RoundEvent::GuessEvaluated { row: 0, .. }));

    let event = assert_ok!(setup.session.submit_word("apple").await);
    assert!(matches!(event, RoundEvent::RoundWon { row: 1, .. }));
    assert_eq!(setup.session.round().status(), RoundStatus::Won);

    let history = setup.history.load().await;
    assert_eq!(history.len(), 1);
    let record = &history.games[0];
    assert!(record.won);
    assert_eq!(record.attempts, 2);
    assert_eq!(record.answer, EASY_ANSWER);
    assert_eq!(record.guesses, vec!["CRANE".to_string(), "APPLE".to_string()]);
    assert_eq!(record.starter, "CRANE");
}

#[tokio::test]
async fn test_losing_round_is_recorded() {
    let mut setup = TestSessionSetup::new().await;

    for _ in 0..5 {
        let event = assert_ok!(setup.session.submit_word("CRANE").await);
        assert!(matches!(event, RoundEvent::GuessEvaluated { .. }));
    }
    let event = assert_ok!(setup.session.submit_word("SLOTH").await);

    match event {
        RoundEvent::RoundLost { answer, .. } => assert_eq!(answer, EASY_ANSWER),
        other => panic!("expected a loss, got {:?}", other),
    }

    let history = setup.history.load().await;
    assert_eq!(history.len(), 1);
    assert!(!history.games[0].won);
    assert_eq!(history.games[0].attempts, 6);
    assert_eq!(history.games[0].guesses.len(), 6);
}

#[tokio::test]
async fn test_unknown_word_keeps_row() {
    let mut setup = TestSessionSetup::new().await;

    let result = setup.session.submit_word("XQZTV").await;
    assert_eq!(
        result,
        Err(GameError::NotInDictionary {
            word: "XQZTV".to_string()
        })
    );
    assert_eq!(setup.session.round().current_row(), 0);
    assert!(setup.history.load().await.is_empty());

    // The rejected row is replaced by the next submission
    assert_ok!(setup.session.submit_word("BRICK").await);
    assert_eq!(setup.session.round().current_row(), 1);
    assert_eq!(setup.session.round().guesses()[0], "BRICK");
}

#[tokio::test]
async fn test_malformed_words_rejected() {
    let mut setup = TestSessionSetup::new().await;

    assert_eq!(
        setup.session.submit_word("APP").await,
        Err(GameError::IncompleteGuess { expected: 5 })
    );
    assert_err!(setup.session.submit_word("AP-LE").await);
    assert_eq!(setup.session.round().current_row(), 0);
}

#[tokio::test]
async fn test_key_presses() {
    let mut setup = TestSessionSetup::new().await;

    for ch in "CRAN".chars() {
        assert_ok!(setup.session.handle_key(Key::Letter(ch)).await);
    }
    assert_eq!(
        setup.session.handle_key(Key::Enter).await,
        Err(GameError::IncompleteGuess { expected: 5 })
    );

    assert_ok!(setup.session.handle_key(Key::Letter('E')).await);
    let event = assert_ok!(setup.session.handle_key(Key::Enter).await);
    assert!(matches!(event, RoundEvent::GuessEvaluated { row: 0, .. }));

    let event = assert_ok!(setup.session.handle_key(Key::Backspace).await);
    assert_eq!(event, RoundEvent::Ignored);
}

#[tokio::test]
async fn test_enter_after_round_over_starts_new_round() {
    let mut setup = TestSessionSetup::new().await;
    assert_ok!(setup.session.submit_word(EASY_ANSWER).await);

    assert_eq!(
        setup.session.submit_word("CRANE").await,
        Err(GameError::RoundOver)
    );

    let event = assert_ok!(setup.session.handle_key(Key::Enter).await);
    assert!(matches!(event, RoundEvent::RoundStarted { .. }));
    assert_eq!(setup.session.round().status(), RoundStatus::InProgress);
    assert_eq!(setup.session.round().current_row(), 0);
}

#[tokio::test]
async fn test_events_reach_handlers() {
    let mut setup = TestSessionSetup::new().await;
    setup.session.announce();
    assert_ok!(setup.session.submit_word("CRANE").await);

    let events = setup.recorded_events();
    assert!(matches!(events[0], RoundEvent::RoundStarted { .. }));
    let typed = events
        .iter()
        .filter(|event| matches!(event, RoundEvent::LetterTyped { .. }))
        .count();
    assert_eq!(typed, 5);
    assert!(matches!(events.last(), Some(RoundEvent::GuessEvaluated { .. })));
}

#[tokio::test]
async fn test_strong_history_selects_hard_word() {
    let games = (0..8).map(|_| create_record(true, EASY_ANSWER)).collect();
    let setup = TestSessionSetup::with_history(games).await;

    assert_eq!(setup.session.round().difficulty(), Difficulty::Hard);
    assert_eq!(setup.session.round().answer(), HARD_ANSWER);
}

#[tokio::test]
async fn test_stats_follow_recorded_games() {
    let mut setup = TestSessionSetup::new().await;

    let stats = setup.session.stats().await;
    assert_eq!(stats.games_played, 0);
    assert_eq!(
        stats.summary_line(),
        "Games: 0 | Win rate: 0% | Mode: Normal | Learn: Building (0) | Starter: -"
    );

    assert_ok!(setup.session.submit_word("CRANE").await);
    assert_ok!(setup.session.submit_word(EASY_ANSWER).await);

    let stats = setup.session.stats().await;
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.win_rate_percent, 100);
    assert_eq!(stats.learning_state, LearningState::Building);
    assert_eq!(stats.total_guesses, 2);
    assert_eq!(stats.starter.as_deref(), Some("CRANE"));
    assert_eq!(stats.current_streak, 1);
    assert_eq!(stats.distribution, [0, 1, 0, 0, 0, 0]);
}

#[tokio::test]
async fn test_history_survives_restart_with_file_store() {
    let dir = tempfile::tempdir().unwrap();

    let mut first = TestSessionSetup::with_store(Arc::new(FileStore::new(dir.path())), Vec::new()).await;
    assert_ok!(first.session.submit_word(EASY_ANSWER).await);

    let second = TestSessionSetup::with_store(Arc::new(FileStore::new(dir.path())), Vec::new()).await;
    let stats = second.session.stats().await;
    assert_eq!(stats.games_played, 1);
    assert_eq!(stats.distribution[0], 1);
}
