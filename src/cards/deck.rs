//! The deck: ranked, size-capped cards for one session.
//!
//! Backed by `im::Vector`, so the session and the game engine can each hold
//! the deck without copying cards.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::builder::SelectedProperty;

/// Immutable, ordered card list.
///
/// Decks produced by `DeckBuilder` are sorted by known-property count
/// (descending) and capped at the configured size. `Deck::new` accepts any
/// card list, which is handy for tests and replays.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Deck {
    properties: Vec<SelectedProperty>,
    cards: Vector<Card>,
}

impl Deck {
    /// Create a deck from selected properties and cards.
    #[must_use]
    pub fn new(properties: Vec<SelectedProperty>, cards: impl IntoIterator<Item = Card>) -> Self {
        Self {
            properties,
            cards: cards.into_iter().collect(),
        }
    }

    /// Properties every card carries, in order.
    #[must_use]
    pub fn properties(&self) -> &[SelectedProperty] {
        &self.properties
    }

    /// Get a card by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    /// Find the card for an item.
    #[must_use]
    pub fn find(&self, item: &str) -> Option<&Card> {
        self.cards.iter().find(|c| c.item.as_str() == item)
    }

    /// Get the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Check if the deck is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Iterate over cards in rank order.
    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }
}

impl std::ops::Index<usize> for Deck {
    type Output = Card;

    fn index(&self, index: usize) -> &Card {
        &self.cards[index]
    }
}
