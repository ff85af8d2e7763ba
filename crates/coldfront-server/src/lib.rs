//! Turn orchestration around the Coldfront rules engine.
//!
//! The engine (`coldfront-core`) applies one team-turn of inputs to one
//! board. This crate supplies everything around that: the `Game` aggregate
//! with its readiness barrier, accumulating raw inputs, round timer and
//! snapshot history, plus a registry that serializes access per game while
//! independent games run in parallel.

pub mod config;
pub mod game;
pub mod registry;

pub use config::GameConfig;
pub use game::{Game, GameSetupError, RoundTimer, TeamPlayers};
pub use registry::{CreateGameError, GameRegistry};
