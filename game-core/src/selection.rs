use game_types::{GameError, GameRecord, ScoredCandidate};
use rand::{Rng, seq::IndexedRandom};
use tracing::debug;

use crate::{ScoringEngine, build_profile, most_frequent_starter};

/// Thresholds controlling when and how strongly the selector personalizes.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionPolicy {
    pub min_games_for_starter_model: usize,
    pub min_guesses_for_profile_model: u32,
    pub normal_top_slice: usize,
    pub hard_top_slice: usize,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            min_games_for_starter_model: 4,
            min_guesses_for_profile_model: 10,
            normal_top_slice: 10,
            hard_top_slice: 4,
        }
    }
}

/// Picks the answer for a new round from a word bank using the player's history.
#[derive(Debug, Clone, Default)]
pub struct AdaptiveSelector {
    pub policy: SelectionPolicy,
}

impl AdaptiveSelector {
    pub fn new(policy: SelectionPolicy) -> Self {
        Self { policy }
    }

    pub fn select_word<R>(
        &self,
        games: &[GameRecord],
        bank: &[String],
        hard_mode: bool,
        rng: &mut R,
    ) -> Result<String, GameError>
    where
        R: Rng + ?Sized,
    {
        if bank.is_empty() {
            return Err(GameError::EmptyWordBank);
        }

        let profile = build_profile(games);
        let starter = most_frequent_starter(games);

        let has_starter_data =
            starter.is_some() && games.len() >= self.policy.min_games_for_starter_model;
        let has_profile_data = profile.total_guesses >= self.policy.min_guesses_for_profile_model;

        if !has_starter_data && !has_profile_data {
            debug!(
                "Not enough history to personalize ({} games, {} guesses), picking uniformly",
                games.len(),
                profile.total_guesses
            );
            return bank.choose(rng).cloned().ok_or(GameError::EmptyWordBank);
        }

        let starter = starter.unwrap_or_default();
        let ranked = self.rank_candidates(bank, &starter, &profile, hard_mode);
        let slice_len = self.top_slice_len(hard_mode).min(ranked.len());
        let top_slice = &ranked[..slice_len];

        debug!(
            "Selecting from top {} of {} candidates (hard mode: {}, starter: {:?})",
            slice_len,
            ranked.len(),
            hard_mode,
            starter
        );

        top_slice
            .choose(rng)
            .map(|candidate| candidate.word.clone())
            .ok_or(GameError::EmptyWordBank)
    }

    /// Score every word in the bank, best first. Equal scores keep bank order.
    pub fn rank_candidates(
        &self,
        bank: &[String],
        starter: &str,
        profile: &game_types::GuessProfile,
        hard_mode: bool,
    ) -> Vec<ScoredCandidate> {
        let mut scored: Vec<ScoredCandidate> = bank
            .iter()
            .map(|word| ScoredCandidate {
                word: word.clone(),
                score: ScoringEngine::score_candidate(word, starter, profile, hard_mode),
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored
    }

    fn top_slice_len(&self, hard_mode: bool) -> usize {
        if hard_mode {
            self.policy.hard_top_slice
        } else {
            self.policy.normal_top_slice
        }
    }
}
