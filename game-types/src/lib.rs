pub mod errors;
pub mod game;
pub mod history;
pub mod profile;
pub mod stats;

// Re-export all types
pub use errors::*;
pub use game::*;
pub use history::*;
pub use profile::*;
pub use stats::*;

/// Number of guess rows on the board.
pub const ROWS: usize = 6;
/// Number of letters in every answer and guess.
pub const COLS: usize = 5;
