//! View models handed to the rendering layer.
//!
//! Rendering itself happens elsewhere; these are plain data with all
//! display decisions (capitalization, highlighting, hidden rows) applied.

use serde::Serialize;

use super::round::{Round, Side};
use crate::cards::Card;

/// One property line on a card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PropertyRow {
    pub label: String,
    pub value: String,
    /// Set on the chosen property once revealed.
    pub highlighted: bool,
}

/// One rendered card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub item_url: String,
    pub title: String,
    pub description: Option<String>,
    pub image: String,
    /// Empty while the card's properties are hidden.
    pub rows: Vec<PropertyRow>,
    pub revealed: bool,
}

impl CardView {
    /// Render a card, optionally highlighting one property.
    #[must_use]
    pub fn new(card: &Card, revealed: bool, highlight: Option<usize>) -> Self {
        let rows = if revealed {
            card.properties
                .iter()
                .enumerate()
                .map(|(i, value)| PropertyRow {
                    label: capitalize(&value.property),
                    value: value.display.clone(),
                    highlighted: highlight == Some(i),
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            item_url: card.item_url().to_string(),
            title: capitalize(&card.label),
            description: card.description.as_deref().map(capitalize),
            image: card.image.clone(),
            rows,
            revealed,
        }
    }
}

/// Both cards of a round plus the sign between them.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RoundView {
    pub round: u64,
    pub a: CardView,
    pub b: CardView,
    /// `>`, `<` or `=` once revealed.
    pub sign: Option<&'static str>,
}

impl RoundView {
    pub(crate) fn new(round: &Round, a: &Card, b: &Card) -> Self {
        let highlight = round.chosen_property();
        Self {
            round: round.number(),
            a: CardView::new(a, round.is_revealed(Side::A), highlight),
            b: CardView::new(b, round.is_revealed(Side::B), highlight),
            sign: round.outcome().map(|c| c.glyph()),
        }
    }
}

/// Uppercase the first character.
#[must_use]
pub fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
