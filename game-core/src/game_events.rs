use game_types::{Difficulty, Evaluation, GameRecord};

#[derive(Debug, Clone, PartialEq)]
pub enum RoundEvent {
    RoundStarted {
        difficulty: Difficulty,
        rows: usize,
        word_length: usize,
    },
    LetterTyped {
        row: usize,
        guess: String,
    },
    LetterDeleted {
        row: usize,
        guess: String,
    },
    /// Input that had no effect, e.g. typing into a full row.
    Ignored,
    GuessEvaluated {
        row: usize,
        guess: String,
        evaluation: Evaluation,
    },
    RoundWon {
        row: usize,
        guess: String,
        evaluation: Evaluation,
        record: GameRecord,
    },
    RoundLost {
        row: usize,
        guess: String,
        evaluation: Evaluation,
        answer: String,
        record: GameRecord,
    },
}

impl RoundEvent {
    /// The record to persist when this event ends the round.
    pub fn finished_record(&self) -> Option<&GameRecord> {
        match self {
            RoundEvent::RoundWon { record, .. } | RoundEvent::RoundLost { record, .. } => Some(record),
            _ => None,
        }
    }
}

/// Event handler trait for processing round events
pub trait RoundEventHandler: Send {
    fn handle_event(&mut self, event: RoundEvent);
}

/// Simple event bus for distributing round events
pub struct RoundEventBus {
    handlers: Vec<Box<dyn RoundEventHandler>>,
}

impl RoundEventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn add_handler(&mut self, handler: Box<dyn RoundEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn publish(&mut self, event: RoundEvent) {
        for handler in &mut self.handlers {
            handler.handle_event(event.clone());
        }
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl Default for RoundEventBus {
    fn default() -> Self {
        Self::new()
    }
}
