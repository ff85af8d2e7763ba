//! Game aggregate and round timing.

mod state;
mod timer;

pub use state::{Game, GameSetupError, TeamPlayers};
pub use timer::RoundTimer;
