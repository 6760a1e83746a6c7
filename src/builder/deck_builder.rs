//! Card assembly and ranking.
//!
//! ## Quirks kept on purpose
//!
//! - Several facts for the same item and property: the last one wins.
//! - Values are keyed by property *label*. Two selected properties sharing a
//!   label share one value, and the later fact overwrites the earlier.
//!
//! Both are soft data ambiguities, logged at debug level, never errors.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use super::selector::{PropertySelector, SelectedProperty};
use crate::cards::card::CardProperties;
use crate::cards::{Card, Deck, PropertyValue, ValueNormalizer};
use crate::core::{DeckConfig, Fact, ItemId, PropertyId};

/// Builds a ranked deck from fact rows.
///
/// ## Example
///
/// ```
/// use top_trumps::{DeckBuilder, DeckConfig, Fact};
///
/// let facts = vec![
///     Fact::new("Q1", "oak", "P2048", "height", "40"),
///     Fact::new("Q2", "birch", "P2048", "height", "25"),
///     Fact::new("Q2", "birch", "P2067", "mass", "900"),
/// ];
///
/// let deck = DeckBuilder::new(&DeckConfig::default()).build(&facts);
///
/// assert_eq!(deck.len(), 2);
/// assert_eq!(deck.get(0).unwrap().label, "birch");
/// ```
#[derive(Clone, Debug)]
pub struct DeckBuilder {
    selector: PropertySelector,
    normalizer: ValueNormalizer,
    max_cards: usize,
    placeholder_image: String,
    image_width: u32,
}

/// Card under construction.
struct Draft {
    item: ItemId,
    label: String,
    description: Option<String>,
    image: String,
    values: IndexMap<String, PropertyValue>,
}

impl DeckBuilder {
    /// Create a builder from deck configuration.
    #[must_use]
    pub fn new(config: &DeckConfig) -> Self {
        Self {
            selector: PropertySelector::from_config(config),
            normalizer: ValueNormalizer::from_config(config),
            max_cards: config.max_cards,
            placeholder_image: config.placeholder_image.clone(),
            image_width: config.image_width,
        }
    }

    /// Select properties and assemble the deck.
    #[must_use]
    pub fn build(&self, facts: &[Fact]) -> Deck {
        let selected = self.selector.select(facts);
        self.assemble(facts, selected)
    }

    /// Assemble the deck for an already selected property list.
    #[must_use]
    pub fn assemble(&self, facts: &[Fact], selected: Vec<SelectedProperty>) -> Deck {
        let wanted: FxHashSet<&PropertyId> = selected.iter().map(|p| &p.id).collect();

        let mut drafts: IndexMap<&ItemId, Draft> = IndexMap::new();
        let mut overwritten = 0usize;

        for fact in facts.iter().filter(|f| wanted.contains(&f.property)) {
            let normalized = self.normalizer.normalize(fact);
            let draft = drafts.entry(&fact.item).or_insert_with(|| self.draft(fact));

            let value = PropertyValue::new(&fact.property_label, normalized.display, normalized.numeric);
            if draft.values.insert(fact.property_label.clone(), value).is_some() {
                overwritten += 1;
            }
        }

        if overwritten > 0 {
            debug!(overwritten, "later facts replaced earlier values with the same label");
        }

        let mut cards: Vec<Card> = drafts
            .into_values()
            .map(|draft| finish(draft, &selected))
            .collect();

        let items = cards.len();
        // Stable: equal counts keep first-appearance order
        cards.sort_by(|a, b| b.known_properties().cmp(&a.known_properties()));
        cards.truncate(self.max_cards);

        info!(
            facts = facts.len(),
            items,
            cards = cards.len(),
            properties = selected.len(),
            "built deck"
        );

        Deck::new(selected, cards)
    }

    fn draft(&self, fact: &Fact) -> Draft {
        let image = match &fact.image {
            Some(url) => secure_image_url(url, self.image_width),
            None => self.placeholder_image.clone(),
        };
        Draft {
            item: fact.item.clone(),
            label: fact.item_label.clone(),
            description: fact.item_description.clone(),
            image,
            values: IndexMap::new(),
        }
    }
}

impl Default for DeckBuilder {
    fn default() -> Self {
        Self::new(&DeckConfig::default())
    }
}

fn finish(draft: Draft, selected: &[SelectedProperty]) -> Card {
    let Draft { item, label, description, image, values } = draft;
    let properties: CardProperties = selected
        .iter()
        .map(|property| {
            values
                .get(&property.label)
                .cloned()
                .unwrap_or_else(|| PropertyValue::placeholder(&property.label))
        })
        .collect();

    Card::assembled(item, label, description, image, properties, values.len())
}

/// Upgrade an image URL to https and append a width hint.
#[must_use]
pub fn secure_image_url(url: &str, width: u32) -> String {
    format!("{}?width={width}", url.replacen("http://", "https://", 1))
}
