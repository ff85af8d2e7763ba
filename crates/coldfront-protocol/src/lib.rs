mod board;
pub mod form;
mod log;
mod submit;
mod types;
pub mod wire;

pub use crate::board::*;
pub use crate::form::{AssetOption, DeclaredAction, RawInputs};
pub use crate::log::*;
pub use crate::submit::*;
pub use crate::types::*;
