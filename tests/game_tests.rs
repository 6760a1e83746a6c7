//! Game round tests.
//!
//! Rounds are driven with scripted draws so every pair is known up front.

use top_trumps::cards::{Card, Deck, PropertyValue};
use top_trumps::core::{DrawSource, GameRng, ItemId};
use top_trumps::game::{Comparison, GameEngine, Phase, Side, Transition};

/// Replays a fixed list of draws, cycling when exhausted.
struct Scripted {
    picks: Vec<usize>,
    next: usize,
}

impl Scripted {
    fn new(picks: &[usize]) -> Self {
        Self { picks: picks.to_vec(), next: 0 }
    }
}

impl DrawSource for Scripted {
    fn pick(&mut self, len: usize) -> usize {
        let pick = self.picks[self.next % self.picks.len()];
        self.next += 1;
        pick % len
    }
}

fn planets() -> Deck {
    let planet = |id: &str, label: &str, mass: Option<f64>, moons: f64| {
        let mass = match mass {
            Some(m) => PropertyValue::new("mass", format!("{m} kg"), m),
            None => PropertyValue::placeholder("mass"),
        };
        Card::new(ItemId::new(id), label, "texture.png")
            .with_description("planet")
            .with_property(mass)
            .with_property(PropertyValue::new("moons", moons.to_string(), moons))
    };

    Deck::new(
        Vec::new(),
        vec![
            planet("Q2", "earth", Some(5.0), 1.0),
            planet("Q111", "mars", Some(3.0), 2.0),
            planet("Q308", "mercury", None, 0.0),
        ],
    )
}

/// Test that every drawn card comes from the deck.
#[test]
fn test_drawn_cards_belong_to_deck() {
    let deck = planets();
    let mut engine = GameEngine::new(deck.clone(), GameRng::new(42)).unwrap();

    for _ in 0..50 {
        assert!(engine.round().card(Side::A) < deck.len());
        assert!(engine.round().card(Side::B) < deck.len());
        assert!(deck.find(engine.card_a().item.as_str()).is_some());

        engine.select_property(1).unwrap();
        engine.advance();
    }
}

/// Test the `>` sign when card A wins.
#[test]
fn test_greater_value_shows_greater_sign() {
    let mut engine = GameEngine::new(planets(), Scripted::new(&[0, 1])).unwrap();

    let transition = engine.select_property(0).unwrap();
    assert_eq!(transition, Transition::Revealed(Comparison::Greater));
    assert_eq!(engine.view().sign, Some(">"));
}

/// Test the `<` sign when card A loses.
#[test]
fn test_smaller_value_shows_less_sign() {
    let mut engine = GameEngine::new(planets(), Scripted::new(&[0, 1])).unwrap();
    assert_eq!(engine.select_property(1).unwrap(), Transition::Revealed(Comparison::Less));
}

/// Test drawing the same card twice.
#[test]
fn test_same_card_is_equal() {
    let mut engine = GameEngine::new(planets(), Scripted::new(&[1, 1])).unwrap();
    assert_eq!(engine.card_a(), engine.card_b());
    assert_eq!(engine.select_property(0).unwrap(), Transition::Revealed(Comparison::Equal));
}

/// Test that a missing value compares as `=`.
#[test]
fn test_missing_value_compares_equal() {
    let mut engine = GameEngine::new(planets(), Scripted::new(&[0, 2])).unwrap();
    assert_eq!(engine.select_property(0).unwrap(), Transition::Revealed(Comparison::Equal));

    let view = engine.view();
    assert_eq!(view.sign, Some("="));
    assert_eq!(view.b.rows[0].value, "-");
}

/// Test that a round reveals once and the next interaction starts a new round.
#[test]
fn test_one_reveal_per_round() {
    let mut engine = GameEngine::new(planets(), Scripted::new(&[0, 1, 2, 0])).unwrap();
    assert_eq!(engine.round().phase(), Phase::AwaitingSelection);
    assert!(engine.view().b.rows.is_empty());

    assert!(matches!(engine.select_property(0).unwrap(), Transition::Revealed(_)));
    assert!(engine.round().is_revealed(Side::B));

    // Second interaction on the same round moves on instead of revealing again
    assert_eq!(engine.select_property(1).unwrap(), Transition::NextRound);
    assert_eq!(engine.round().number(), 2);
    assert_eq!(engine.round().phase(), Phase::AwaitingSelection);
    assert_eq!(engine.card_a().label, "mercury");
    assert_eq!(engine.card_b().label, "earth");
}

/// Test row highlighting and capitalization in the round view.
#[test]
fn test_view_highlights_chosen_row() {
    let mut engine = GameEngine::new(planets(), Scripted::new(&[0, 1])).unwrap();
    engine.select_property(1).unwrap();

    let view = engine.view();
    assert_eq!(view.a.title, "Earth");
    assert_eq!(view.b.title, "Mars");
    assert_eq!(view.a.rows[1].label, "Moons");
    assert!(view.a.rows[1].highlighted);
    assert!(view.b.rows[1].highlighted);
    assert!(!view.a.rows[0].highlighted);
}

/// Test that equal seeds replay the same rounds.
#[test]
fn test_seeded_games_replay() {
    let mut first = GameEngine::new(planets(), GameRng::new(9)).unwrap();
    let mut second = GameEngine::new(planets(), GameRng::new(9)).unwrap();

    for _ in 0..20 {
        assert_eq!(first.round(), second.round());
        first.select_property(0).unwrap();
        second.select_property(0).unwrap();
        first.advance();
        second.advance();
    }
}
