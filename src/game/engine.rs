//! Game engine: draws pairs and resolves property choices.

use tracing::debug;

use super::round::{Comparison, Phase, Round, Side};
use super::view::RoundView;
use crate::cards::{Card, Deck};
use crate::core::{DrawSource, GameRng};
use crate::{Error, Result};

/// What an interaction did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// Card B was revealed with this outcome.
    Revealed(Comparison),
    /// The previous round was discarded and a new pair drawn.
    NextRound,
    /// Nothing changed.
    Ignored,
}

/// Runs rounds over a non-empty deck.
///
/// The deck is shared read-only; only the current [`Round`] changes, and
/// only in response to [`select_property`](Self::select_property) or
/// [`advance`](Self::advance).
///
/// ## Example
///
/// ```
/// use top_trumps::cards::{Card, Deck, PropertyValue};
/// use top_trumps::core::{GameRng, ItemId};
/// use top_trumps::game::{GameEngine, Transition};
///
/// let card = Card::new(ItemId::new("Q1"), "tower", "texture.png")
///     .with_property(PropertyValue::new("height", "300 m", 300.0));
/// let deck = Deck::new(Vec::new(), vec![card]);
///
/// let mut engine = GameEngine::new(deck, GameRng::new(7)).unwrap();
/// assert!(matches!(engine.select_property(0).unwrap(), Transition::Revealed(_)));
/// assert_eq!(engine.advance(), Transition::NextRound);
/// ```
#[derive(Clone, Debug)]
pub struct GameEngine<R = GameRng> {
    deck: Deck,
    rng: R,
    round: Round,
}

impl<R: DrawSource> GameEngine<R> {
    /// Start a game, drawing the first pair.
    ///
    /// Returns `Error::EmptyDeck` if there is nothing to draw from.
    pub fn new(deck: Deck, mut rng: R) -> Result<Self> {
        if deck.is_empty() {
            return Err(Error::EmptyDeck);
        }
        let round = draw(&deck, &mut rng, 1);
        Ok(Self { deck, rng, round })
    }

    /// The deck being played.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// The current round.
    #[must_use]
    pub fn round(&self) -> &Round {
        &self.round
    }

    /// The draw source.
    #[must_use]
    pub fn rng(&self) -> &R {
        &self.rng
    }

    /// A card of the current round.
    #[must_use]
    pub fn card(&self, side: Side) -> &Card {
        &self.deck[self.round.card(side)]
    }

    /// The player's card.
    #[must_use]
    pub fn card_a(&self) -> &Card {
        self.card(Side::A)
    }

    /// The opponent's card.
    #[must_use]
    pub fn card_b(&self) -> &Card {
        self.card(Side::B)
    }

    /// Choose a property on card A.
    ///
    /// While awaiting a selection this reveals card B and returns the
    /// outcome. Once revealed, any selection counts as "continue" and starts
    /// the next round; the index is not checked then.
    pub fn select_property(&mut self, index: usize) -> Result<Transition> {
        match self.round.phase() {
            Phase::AwaitingSelection => {
                let a = self.card_a();
                let count = a.properties.len();
                let (Some(value_a), Some(value_b)) = (a.property(index), self.card_b().property(index)) else {
                    return Err(Error::PropertyOutOfRange { index, count });
                };

                let outcome = Comparison::between(value_a, value_b);
                debug!(
                    round = self.round.number(),
                    property = %value_a.property,
                    a = %value_a.display,
                    b = %value_b.display,
                    sign = outcome.glyph(),
                    "revealed"
                );
                self.round.reveal(index, outcome);
                Ok(Transition::Revealed(outcome))
            }
            Phase::Revealed { .. } => Ok(self.next_round()),
        }
    }

    /// Interact anywhere other than a property of card A.
    ///
    /// Starts the next round after a reveal; otherwise ignored.
    pub fn advance(&mut self) -> Transition {
        match self.round.phase() {
            Phase::AwaitingSelection => Transition::Ignored,
            Phase::Revealed { .. } => self.next_round(),
        }
    }

    /// Render the current round.
    #[must_use]
    pub fn view(&self) -> RoundView {
        RoundView::new(&self.round, self.card_a(), self.card_b())
    }

    fn next_round(&mut self) -> Transition {
        self.round = draw(&self.deck, &mut self.rng, self.round.number() + 1);
        Transition::NextRound
    }
}

/// Draw A and B independently, with replacement.
fn draw<R: DrawSource>(deck: &Deck, rng: &mut R, number: u64) -> Round {
    let a = rng.pick(deck.len());
    let b = rng.pick(deck.len());
    debug!(round = number, a = %deck[a].label, b = %deck[b].label, "drew cards");
    Round::new(number, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::PropertyValue;
    use crate::core::ItemId;

    /// Replays a fixed list of indices.
    struct Script(std::vec::IntoIter<usize>);

    impl Script {
        fn new(picks: &[usize]) -> Self {
            Self(picks.to_vec().into_iter())
        }
    }

    impl DrawSource for Script {
        fn pick(&mut self, len: usize) -> usize {
            self.0.next().unwrap() % len
        }
    }

    fn deck() -> Deck {
        let card = |id: &str, mass: Option<f64>| {
            let value = match mass {
                Some(m) => PropertyValue::new("mass", format!("{m} kg"), m),
                None => PropertyValue::placeholder("mass"),
            };
            Card::new(ItemId::new(id), id, "texture.png").with_property(value)
        };
        Deck::new(
            Vec::new(),
            vec![card("Q1", Some(5.0)), card("Q2", Some(3.0)), card("Q3", None)],
        )
    }

    #[test]
    fn test_empty_deck_rejected() {
        let err = GameEngine::new(Deck::default(), GameRng::new(0)).unwrap_err();
        assert!(matches!(err, Error::EmptyDeck));
    }

    #[test]
    fn test_reveal_then_next_round() {
        let mut engine = GameEngine::new(deck(), Script::new(&[0, 1, 2, 2])).unwrap();
        assert_eq!(engine.card_a().label, "Q1");
        assert_eq!(engine.card_b().label, "Q2");

        assert_eq!(engine.select_property(0).unwrap(), Transition::Revealed(Comparison::Greater));
        assert_eq!(engine.round().outcome(), Some(Comparison::Greater));

        assert_eq!(engine.select_property(0).unwrap(), Transition::NextRound);
        assert_eq!(engine.round().number(), 2);
        assert_eq!(engine.round().phase(), Phase::AwaitingSelection);
        assert_eq!(engine.card_a().label, "Q3");
        assert_eq!(engine.card_b().label, "Q3");
    }

    #[test]
    fn test_missing_value_is_equal() {
        let mut engine = GameEngine::new(deck(), Script::new(&[2, 0])).unwrap();
        assert_eq!(engine.select_property(0).unwrap(), Transition::Revealed(Comparison::Equal));
    }

    #[test]
    fn test_out_of_range_property() {
        let mut engine = GameEngine::new(deck(), Script::new(&[0, 1])).unwrap();
        let err = engine.select_property(3).unwrap_err();
        assert!(matches!(err, Error::PropertyOutOfRange { index: 3, count: 1 }));
        assert_eq!(engine.round().phase(), Phase::AwaitingSelection);
    }

    #[test]
    fn test_advance_before_reveal_is_ignored() {
        let mut engine = GameEngine::new(deck(), Script::new(&[0, 1, 1, 0])).unwrap();
        assert_eq!(engine.advance(), Transition::Ignored);
        assert_eq!(engine.round().number(), 1);

        engine.select_property(0).unwrap();
        assert_eq!(engine.advance(), Transition::NextRound);
        assert_eq!(engine.card_a().label, "Q2");
    }
}
