//! Core types: facts, selection inputs, configuration, RNG, session context.
//!
//! Everything here is independent of how facts are fetched or how cards are
//! rendered. The other modules build on these types.

pub mod fact;
pub mod selection;
pub mod rng;
pub mod config;
pub mod session;

pub use fact::{Fact, ItemId, PropertyId};
pub use selection::{Selection, TopicId};
pub use rng::{DrawSource, GameRng, GameRngState};
pub use config::DeckConfig;
pub use session::Session;
