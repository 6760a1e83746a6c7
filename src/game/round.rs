//! Round state and comparison outcome.

use serde::{Deserialize, Serialize};

use crate::cards::PropertyValue;

/// Outcome of comparing card A's value against card B's.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Comparison {
    /// A is greater than B.
    Greater,
    /// A is less than B.
    Less,
    /// Equal, or not orderable.
    Equal,
}

impl Comparison {
    /// Compare two numeric values.
    ///
    /// A missing or NaN operand is neither greater nor less, so the outcome
    /// collapses to `Equal`.
    #[must_use]
    pub fn of(a: Option<f64>, b: Option<f64>) -> Self {
        match (a, b) {
            (Some(a), Some(b)) if a > b => Comparison::Greater,
            (Some(a), Some(b)) if a < b => Comparison::Less,
            _ => Comparison::Equal,
        }
    }

    /// Compare two property values by their numeric parts.
    #[must_use]
    pub fn between(a: &PropertyValue, b: &PropertyValue) -> Self {
        Self::of(a.numeric, b.numeric)
    }

    /// Glyph shown between the cards.
    #[must_use]
    pub const fn glyph(self) -> &'static str {
        match self {
            Comparison::Greater => ">",
            Comparison::Less => "<",
            Comparison::Equal => "=",
        }
    }
}

impl std::fmt::Display for Comparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.glyph())
    }
}

/// Which card of the round.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    A,
    B,
}

/// Round phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Card A shown in full, card B header only.
    AwaitingSelection,
    /// A property was chosen; both cards shown.
    Revealed {
        /// Chosen property, by position.
        property: usize,
        outcome: Comparison,
    },
}

/// One pair of cards and the player's progress on it.
///
/// `card_a` and `card_b` are deck positions and may be equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    number: u64,
    card_a: usize,
    card_b: usize,
    phase: Phase,
}

impl Round {
    pub(crate) fn new(number: u64, card_a: usize, card_b: usize) -> Self {
        Self {
            number,
            card_a,
            card_b,
            phase: Phase::AwaitingSelection,
        }
    }

    pub(crate) fn reveal(&mut self, property: usize, outcome: Comparison) {
        self.phase = Phase::Revealed { property, outcome };
    }

    /// Round number, starting at 1.
    #[must_use]
    pub fn number(&self) -> u64 {
        self.number
    }

    /// Deck position of a card.
    #[must_use]
    pub fn card(&self, side: Side) -> usize {
        match side {
            Side::A => self.card_a,
            Side::B => self.card_b,
        }
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a card's properties are visible.
    #[must_use]
    pub fn is_revealed(&self, side: Side) -> bool {
        match side {
            Side::A => true,
            Side::B => matches!(self.phase, Phase::Revealed { .. }),
        }
    }

    /// The chosen property, once revealed.
    #[must_use]
    pub fn chosen_property(&self) -> Option<usize> {
        match self.phase {
            Phase::Revealed { property, .. } => Some(property),
            Phase::AwaitingSelection => None,
        }
    }

    /// The comparison outcome, once revealed.
    #[must_use]
    pub fn outcome(&self) -> Option<Comparison> {
        match self.phase {
            Phase::Revealed { outcome, .. } => Some(outcome),
            Phase::AwaitingSelection => None,
        }
    }
}
