//! Cards - one item with a value for every selected property.
//!
//! Cards are built once by the `DeckBuilder` and never change afterwards.
//! The property list is aligned with the deck's selected properties: entry
//! `i` always belongs to selected property `i`, with the "-" placeholder
//! where the item has no value.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::value::PropertyValue;
use crate::core::config::MAX_PROPERTIES;
use crate::core::ItemId;

/// Property values of one card, inline up to the default property count.
pub type CardProperties = SmallVec<[PropertyValue; MAX_PROPERTIES]>;

/// A playable card.
///
/// ## Example
///
/// ```
/// use top_trumps::cards::{Card, PropertyValue};
/// use top_trumps::core::ItemId;
///
/// let card = Card::new(ItemId::new("Q90"), "paris", "texture.png")
///     .with_property(PropertyValue::new("area", "105.40 km^2", 105.4))
///     .with_property(PropertyValue::placeholder("population"));
///
/// assert_eq!(card.known_properties(), 1);
/// assert_eq!(card.property(1).unwrap().display, "-");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Card {
    /// Item this card represents.
    pub item: ItemId,

    /// Item label.
    pub label: String,

    /// Optional short description.
    pub description: Option<String>,

    /// Image URL, or the placeholder image.
    pub image: String,

    /// One value per selected property, in selection order.
    pub properties: CardProperties,

    known_properties: usize,
}

impl Card {
    /// Create a card without properties.
    #[must_use]
    pub fn new(item: ItemId, label: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            item,
            label: label.into(),
            description: None,
            image: image.into(),
            properties: SmallVec::new(),
            known_properties: 0,
        }
    }

    /// Set the description (builder pattern).
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a property value (builder pattern).
    ///
    /// Placeholders do not count as known properties.
    #[must_use]
    pub fn with_property(mut self, value: PropertyValue) -> Self {
        if !value.is_placeholder() {
            self.known_properties += 1;
        }
        self.properties.push(value);
        self
    }

    /// Create a card with an explicit known-property count.
    ///
    /// The count can differ from the number of non-placeholder entries when
    /// two selected properties share a label and therefore one value.
    pub(crate) fn assembled(
        item: ItemId,
        label: String,
        description: Option<String>,
        image: String,
        properties: CardProperties,
        known_properties: usize,
    ) -> Self {
        Self {
            item,
            label,
            description,
            image,
            properties,
            known_properties,
        }
    }

    /// Number of properties the item actually has a value for.
    #[must_use]
    pub fn known_properties(&self) -> usize {
        self.known_properties
    }

    /// Property value at a position in selection order.
    #[must_use]
    pub fn property(&self, index: usize) -> Option<&PropertyValue> {
        self.properties.get(index)
    }

    /// Property value by label.
    #[must_use]
    pub fn property_by_label(&self, label: &str) -> Option<&PropertyValue> {
        self.properties.iter().find(|p| p.property == label)
    }

    /// Link target for the card header.
    #[must_use]
    pub fn item_url(&self) -> &str {
        self.item.as_str()
    }
}
