use std::sync::Arc;

use game_core::{
    AdaptiveSelector, Input, RoundEvent, RoundEventBus, RoundEventHandler, RoundState, WordBank,
    classify_difficulty, compute_aggregate_stats, is_alphabetic,
};
use game_persistence::HistoryRepository;
use game_types::{AggregateStats, COLS, GameError, GameRecord};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use crate::dictionary::DictionaryValidator;

/// A key press from the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Letter(char),
    Backspace,
    Enter,
}

/// Drives one player's rounds: picks answers from their history, validates guesses,
/// publishes round events and records finished games.
pub struct GameSession {
    history: Arc<HistoryRepository>,
    validator: Arc<DictionaryValidator>,
    word_bank: Arc<WordBank>,
    selector: AdaptiveSelector,
    round: RoundState,
    event_bus: RoundEventBus,
    rng: StdRng,
}

impl GameSession {
    pub async fn new(
        history: Arc<HistoryRepository>,
        validator: Arc<DictionaryValidator>,
        word_bank: Arc<WordBank>,
    ) -> Result<Self, GameError> {
        Self::with_rng(history, validator, word_bank, StdRng::from_os_rng()).await
    }

    /// Session with a caller-supplied rng, for reproducible word selection.
    pub async fn with_rng(
        history: Arc<HistoryRepository>,
        validator: Arc<DictionaryValidator>,
        word_bank: Arc<WordBank>,
        mut rng: StdRng,
    ) -> Result<Self, GameError> {
        let selector = AdaptiveSelector::default();
        let games = history.load().await.games;
        let round = next_round(&games, &word_bank, &selector, &mut rng)?;

        Ok(Self {
            history,
            validator,
            word_bank,
            selector,
            round,
            event_bus: RoundEventBus::new(),
            rng,
        })
    }

    pub fn add_handler(&mut self, handler: Box<dyn RoundEventHandler>) {
        self.event_bus.add_handler(handler);
        debug!("Session has {} event handlers", self.event_bus.handler_count());
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Announce the round in play to every handler.
    pub fn announce(&mut self) -> RoundEvent {
        let event = self.round.started_event();
        self.event_bus.publish(event.clone());
        event
    }

    /// Abandon the current round and start another chosen from the latest history.
    pub async fn new_game(&mut self) -> Result<RoundEvent, GameError> {
        let games = self.history.load().await.games;
        self.round = next_round(&games, &self.word_bank, &self.selector, &mut self.rng)?;
        Ok(self.announce())
    }

    pub async fn handle_key(&mut self, key: Key) -> Result<RoundEvent, GameError> {
        let input = match key {
            Key::Letter(ch) => Input::Letter(ch),
            Key::Backspace => Input::Backspace,
            Key::Enter if self.round.status().is_over() => return self.new_game().await,
            Key::Enter => {
                let in_dictionary = match self.round.pending_guess() {
                    Some(guess) => {
                        let guess = guess.to_string();
                        self.validator.validate(&guess).await
                    }
                    // Short rows are rejected by the round itself
                    None => true,
                };
                Input::Submit { in_dictionary }
            }
        };

        self.dispatch(input).await
    }

    /// Replace the current row with `word` and submit it.
    pub async fn submit_word(&mut self, word: &str) -> Result<RoundEvent, GameError> {
        if self.round.status().is_over() {
            return Err(GameError::RoundOver);
        }
        if word.chars().count() != COLS {
            return Err(GameError::IncompleteGuess { expected: COLS });
        }
        if !is_alphabetic(word) {
            return Err(GameError::InvalidInput {
                input: word.to_string(),
            });
        }

        while !self.round.guesses()[self.round.current_row()].is_empty() {
            self.dispatch(Input::Backspace).await?;
        }
        for ch in word.chars() {
            self.dispatch(Input::Letter(ch)).await?;
        }

        self.handle_key(Key::Enter).await
    }

    pub async fn stats(&self) -> AggregateStats {
        let history = self.history.load().await;
        compute_aggregate_stats(&history.games, &self.selector.policy)
    }

    async fn dispatch(&mut self, input: Input) -> Result<RoundEvent, GameError> {
        let event = self.round.apply(input)?;

        if let Some(record) = event.finished_record() {
            self.record_game(record.clone()).await;
        }
        self.event_bus.publish(event.clone());
        Ok(event)
    }

    async fn record_game(&self, record: GameRecord) {
        info!(
            "Round over: {} in {} attempts (answer {})",
            if record.won { "won" } else { "lost" },
            record.attempts,
            record.answer
        );
        if let Err(e) = self.history.append(record).await {
            warn!("Failed to save game history: {:#}", e);
        }
    }
}

fn next_round(
    games: &[GameRecord],
    word_bank: &WordBank,
    selector: &AdaptiveSelector,
    rng: &mut StdRng,
) -> Result<RoundState, GameError> {
    let difficulty = classify_difficulty(games);
    let bank = word_bank.words_for(difficulty);
    let answer = selector.select_word(games, bank, difficulty.is_hard(), rng)?;

    debug!(
        "Starting {} round from {} candidates after {} games",
        difficulty.label(),
        bank.len(),
        games.len()
    );
    Ok(RoundState::new(answer, difficulty))
}
