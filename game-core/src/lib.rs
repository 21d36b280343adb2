pub mod game_events;
pub mod game_state;
pub mod profile;
pub mod scoring;
pub mod selection;
pub mod stats;
pub mod word_bank;

// Re-export main components
pub use game_events::*;
pub use game_state::*;
pub use profile::*;
pub use scoring::*;
pub use selection::*;
pub use stats::*;
pub use word_bank::*;
