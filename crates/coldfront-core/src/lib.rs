mod assets;
mod engine;
mod events;
mod resolver;
mod rng;
mod roster;
mod scoring;
mod tables;

pub use crate::assets::*;
pub use crate::engine::*;
pub use crate::events::*;
pub use crate::resolver::*;
pub use crate::rng::*;
pub use crate::roster::*;
pub use crate::scoring::*;
pub use crate::tables::*;
