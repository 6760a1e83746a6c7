//! Deck construction: property selection and card assembly.
//!
//! Two passes over the same fact rows:
//!
//! 1. `PropertySelector` counts distinct items per property and keeps the
//!    most widely shared ones.
//! 2. `DeckBuilder` groups facts per item, normalizes the values of the
//!    selected properties and ranks the resulting cards.
//!
//! Both passes group with insertion-ordered maps, so ties always resolve to
//! whatever appeared first in the input.

pub mod selector;
pub mod deck_builder;

pub use selector::{PropertySelector, PropertyStat, SelectedProperty};
pub use deck_builder::{secure_image_url, DeckBuilder};
