//! Property values shown on cards.
//!
//! A `PropertyValue` separates what the player reads from what the game
//! compares:
//!
//! - `display`: human-readable text, possibly unit-suffixed ("105 km^2")
//! - `numeric`: the comparable number (epoch milliseconds for dates)
//!
//! `numeric` is `None` for the "-" placeholder of a property the item lacks,
//! and `Some(NaN)` for values that failed to parse. Neither compares greater
//! or less than anything.

use serde::{Deserialize, Serialize};

/// Display text of a missing value.
pub const PLACEHOLDER_DISPLAY: &str = "-";

/// One property value on a card.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PropertyValue {
    /// Property label this value was recorded under.
    pub property: String,
    /// Human-readable value.
    pub display: String,
    /// Comparable value; `None` for placeholders.
    pub numeric: Option<f64>,
}

impl PropertyValue {
    /// Create a recorded value.
    #[must_use]
    pub fn new(property: impl Into<String>, display: impl Into<String>, numeric: f64) -> Self {
        Self {
            property: property.into(),
            display: display.into(),
            numeric: Some(numeric),
        }
    }

    /// Create the "-" placeholder for a property the item lacks.
    #[must_use]
    pub fn placeholder(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            display: PLACEHOLDER_DISPLAY.to_string(),
            numeric: None,
        }
    }

    /// Whether this is a placeholder.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.numeric.is_none()
    }

    /// Whether the numeric value can be ordered against another value.
    #[must_use]
    pub fn is_comparable(&self) -> bool {
        self.numeric.is_some_and(|n| !n.is_nan())
    }
}
