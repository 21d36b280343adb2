use std::collections::BTreeMap;

use game_types::{COLS, Difficulty, Evaluation, GameError, GameRecord, LetterStatus, ROWS, RoundStatus};

use crate::{RoundEvent, ScoringEngine};

/// A discrete command produced by the front-end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Letter(char),
    Backspace,
    /// Submit the current row. The caller resolves dictionary validity before dispatching.
    Submit { in_dictionary: bool },
}

/// State of the round in play. Owned by a single session; mutated only through [`RoundState::apply`].
#[derive(Debug, Clone)]
pub struct RoundState {
    answer: String,
    difficulty: Difficulty,
    guesses: Vec<String>,
    evaluations: Vec<Option<Evaluation>>,
    current_row: usize,
    status: RoundStatus,
    keyboard: BTreeMap<char, LetterStatus>,
    starter: Option<String>,
}

impl RoundState {
    pub fn new(answer: impl Into<String>, difficulty: Difficulty) -> Self {
        Self {
            answer: answer.into().to_uppercase(),
            difficulty,
            guesses: vec![String::new(); ROWS],
            evaluations: vec![None; ROWS],
            current_row: 0,
            status: RoundStatus::InProgress,
            keyboard: BTreeMap::new(),
            starter: None,
        }
    }

    pub fn started_event(&self) -> RoundEvent {
        RoundEvent::RoundStarted {
            difficulty: self.difficulty,
            rows: ROWS,
            word_length: COLS,
        }
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn current_row(&self) -> usize {
        self.current_row
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    pub fn evaluations(&self) -> &[Option<Evaluation>] {
        &self.evaluations
    }

    pub fn keyboard(&self) -> &BTreeMap<char, LetterStatus> {
        &self.keyboard
    }

    pub fn starter(&self) -> Option<&str> {
        self.starter.as_deref()
    }

    /// The current row when it is full and ready to be checked against the dictionary.
    pub fn pending_guess(&self) -> Option<&str> {
        if self.status.is_over() {
            return None;
        }
        let guess = &self.guesses[self.current_row];
        (guess.chars().count() == COLS).then_some(guess.as_str())
    }

    pub fn apply(&mut self, input: Input) -> Result<RoundEvent, GameError> {
        if self.status.is_over() {
            return Err(GameError::RoundOver);
        }

        match input {
            Input::Letter(ch) => self.type_letter(ch),
            Input::Backspace => Ok(self.delete_letter()),
            Input::Submit { in_dictionary } => self.submit(in_dictionary),
        }
    }

    fn type_letter(&mut self, ch: char) -> Result<RoundEvent, GameError> {
        if !ch.is_ascii_alphabetic() {
            return Err(GameError::InvalidInput {
                input: ch.to_string(),
            });
        }

        let row = self.current_row;
        let guess = &mut self.guesses[row];
        if guess.chars().count() >= COLS {
            return Ok(RoundEvent::Ignored);
        }

        guess.push(ch.to_ascii_uppercase());
        Ok(RoundEvent::LetterTyped {
            row,
            guess: guess.clone(),
        })
    }

    fn delete_letter(&mut self) -> RoundEvent {
        let row = self.current_row;
        let guess = &mut self.guesses[row];
        if guess.pop().is_none() {
            return RoundEvent::Ignored;
        }

        RoundEvent::LetterDeleted {
            row,
            guess: guess.clone(),
        }
    }

    fn submit(&mut self, in_dictionary: bool) -> Result<RoundEvent, GameError> {
        let row = self.current_row;
        let guess = self.guesses[row].clone();

        if guess.chars().count() != COLS {
            return Err(GameError::IncompleteGuess { expected: COLS });
        }
        if !in_dictionary {
            return Err(GameError::NotInDictionary { word: guess });
        }

        let evaluation = ScoringEngine::evaluate_guess(&guess, &self.answer);
        self.evaluations[row] = Some(evaluation);
        self.update_keyboard(&guess, &evaluation);
        if self.starter.is_none() {
            self.starter = Some(guess.clone());
        }

        if ScoringEngine::is_solved(&evaluation) {
            self.status = RoundStatus::Won;
            let record = self.finished_record(true, row + 1);
            return Ok(RoundEvent::RoundWon {
                row,
                guess,
                evaluation,
                record,
            });
        }

        self.current_row += 1;
        if self.current_row >= ROWS {
            self.status = RoundStatus::Lost;
            let record = self.finished_record(false, ROWS);
            return Ok(RoundEvent::RoundLost {
                row,
                guess,
                evaluation,
                answer: self.answer.clone(),
                record,
            });
        }

        Ok(RoundEvent::GuessEvaluated {
            row,
            guess,
            evaluation,
        })
    }

    fn update_keyboard(&mut self, guess: &str, evaluation: &Evaluation) {
        for (ch, status) in guess.chars().zip(evaluation.iter()) {
            let entry = self.keyboard.entry(ch).or_insert(*status);
            if status.priority() > entry.priority() {
                *entry = *status;
            }
        }
    }

    fn finished_record(&self, won: bool, attempts: usize) -> GameRecord {
        let guesses = self.guesses[..attempts].to_vec();
        let starter = self
            .starter
            .clone()
            .or_else(|| guesses.first().cloned())
            .unwrap_or_default();

        GameRecord::new(won, attempts as u32, self.answer.clone(), guesses, starter)
    }
}
