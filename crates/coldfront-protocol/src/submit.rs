use thiserror::Error;

use crate::LogCategory;

/// User-correctable rejections of a turn submission. These never mutate game
/// state; the boundary surfaces them to the requester as flash messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("The turn had already ended!")]
    StaleTurn,
    #[error("The game is finished!")]
    GameFinished,
    #[error("You already finished your turn - waiting for other players.")]
    AlreadyReady,
    #[error("It is not your turn now, wait for your opponents to finish.")]
    NotYourTurn,
}

impl SubmitError {
    /// `(message, category)` pair in the shape the rendering layer expects.
    pub fn as_flash(&self) -> (String, LogCategory) {
        (self.to_string(), LogCategory::Error)
    }
}
