//! Per-game orchestration configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Timer settings for one game.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameConfig {
    /// Length of each team's input window.
    pub round_length: Duration,
    /// Grace period after an unpause before the clock is considered running.
    pub unpause_delay: Duration,
    /// How far past the deadline the boundary waits before forcing
    /// resolution.
    pub timeout_grace: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            round_length: Duration::from_secs(180),
            unpause_delay: Duration::from_secs(5),
            timeout_grace: Duration::from_secs(5),
        }
    }
}
