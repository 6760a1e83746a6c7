//! Card system: property values, normalization, cards and the deck.
//!
//! ## Key Types
//!
//! - `PropertyValue`: Display text plus comparable number for one property
//! - `ValueNormalizer`: Turns a raw fact value into a `PropertyValue`
//! - `Card`: One item with a value for every selected property
//! - `Deck`: The ranked, size-capped card list for a session

pub mod value;
pub mod normalize;
pub mod card;
pub mod deck;

pub use value::{PropertyValue, PLACEHOLDER_DISPLAY};
pub use normalize::{format_date, format_number, ordinal, simplify_unit, Normalized, ValueNormalizer};
pub use card::Card;
pub use deck::Deck;
