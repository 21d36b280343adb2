use std::collections::BTreeMap;
use std::io::Write;

use colored::{ColoredString, Colorize};
use game_core::{RoundEvent, RoundEventHandler};
use game_types::{AggregateStats, COLS, Evaluation, LetterStatus, ROWS};

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];
/// Width of the longest distribution bar.
const BAR_WIDTH: usize = 20;
/// Empty buckets still get a stub so every row has a bar.
const MIN_BAR: usize = 2;

/// Draws board rows. `evaluation` is `None` for rows that have not been submitted.
pub trait Renderer {
    fn render(&mut self, row: usize, guess: &str, evaluation: Option<&Evaluation>);
}

fn tile(ch: char, status: Option<LetterStatus>) -> ColoredString {
    match status {
        Some(LetterStatus::Correct) => format!("[{}]", ch).black().on_green(),
        Some(LetterStatus::Present) => format!("({})", ch).black().on_yellow(),
        Some(LetterStatus::Absent) => format!(" {} ", ch).white().on_bright_black(),
        None => format!(" {} ", ch).normal(),
    }
}

/// One board row. Correct letters are bracketed, present letters parenthesized and
/// unfilled cells shown as `_`.
pub fn format_row(guess: &str, evaluation: Option<&Evaluation>) -> String {
    let mut letters = guess.chars();
    (0..COLS)
        .map(|col| {
            let ch = letters.next().unwrap_or('_');
            tile(ch, evaluation.map(|eval| eval[col])).to_string()
        })
        .collect::<Vec<_>>()
        .join("")
}

/// The QWERTY keyboard with each letter marked by the best status seen this round.
pub fn format_keyboard(keyboard: &BTreeMap<char, LetterStatus>) -> String {
    KEYBOARD_ROWS
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let keys: String = row
                .chars()
                .map(|ch| tile(ch, keyboard.get(&ch).copied()).to_string())
                .collect();
            format!("{}{}", " ".repeat(i), keys)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Played/won/streak totals followed by one bar per row, scaled to the largest bucket.
pub fn format_stats(stats: &AggregateStats) -> String {
    let mut lines = vec![
        format!(
            "Played: {} | Won: {} | Win rate: {}% | Current streak: {}",
            stats.games_played, stats.wins, stats.win_rate_percent, stats.current_streak
        ),
        "Guess distribution".to_string(),
    ];

    let max_count = stats.distribution.iter().copied().max().unwrap_or(0).max(1);
    for (i, &count) in stats.distribution.iter().enumerate() {
        let scaled = (count as f64 / max_count as f64 * BAR_WIDTH as f64).round() as usize;
        let bar = "#".repeat(scaled.max(MIN_BAR));
        let bar = if count > 0 { bar.green() } else { bar.bright_black() };
        lines.push(format!("{} {} {}", i + 1, bar, count));
    }

    lines.join("\n")
}

pub fn win_message(attempts: usize) -> String {
    format!(
        "You won in {} guess{}! Press Enter for a new game.",
        attempts,
        if attempts == 1 { "" } else { "es" }
    )
}

pub fn loss_message(answer: &str) -> String {
    format!("Out of tries. The word was {}. Press Enter for a new game.", answer)
}

/// Writes round progress to a terminal-like sink.
pub struct TerminalRenderer<W: Write + Send> {
    out: W,
}

impl<W: Write + Send> TerminalRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn line(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::warn!("Failed to write to terminal: {}", e);
        }
    }
}

impl<W: Write + Send> Renderer for TerminalRenderer<W> {
    fn render(&mut self, row: usize, guess: &str, evaluation: Option<&Evaluation>) {
        let text = format!("{}  {}", row + 1, format_row(guess, evaluation));
        self.line(&text);
    }
}

impl<W: Write + Send> RoundEventHandler for TerminalRenderer<W> {
    fn handle_event(&mut self, event: RoundEvent) {
        match event {
            RoundEvent::RoundStarted {
                difficulty,
                rows,
                word_length,
            } => {
                self.line(&format!(
                    "New game ({} mode). Guess the {}-letter word in {} tries.",
                    difficulty.label(),
                    word_length,
                    rows
                ));
                for row in 0..ROWS {
                    self.render(row, "", None);
                }
            }
            RoundEvent::GuessEvaluated {
                row,
                guess,
                evaluation,
            } => {
                self.render(row, &guess, Some(&evaluation));
                self.line("Keep going.");
            }
            RoundEvent::RoundWon {
                row,
                guess,
                evaluation,
                ..
            } => {
                self.render(row, &guess, Some(&evaluation));
                self.line(&win_message(row + 1));
            }
            RoundEvent::RoundLost {
                row,
                guess,
                evaluation,
                answer,
                ..
            } => {
                self.render(row, &guess, Some(&evaluation));
                self.line(&loss_message(&answer));
            }
            // Rows are typed a whole line at a time
            RoundEvent::LetterTyped { .. } | RoundEvent::LetterDeleted { .. } | RoundEvent::Ignored => {}
        }
    }
}
