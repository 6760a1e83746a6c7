//! Deck and session configuration.
//!
//! Defaults reproduce the classic game: five properties, 32 cards, the
//! public Wikidata SPARQL endpoint. Hosts may override any field from TOML;
//! missing keys keep their defaults.

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Maximum number of properties shown on every card.
pub const MAX_PROPERTIES: usize = 5;

/// Maximum number of cards in a deck.
pub const MAX_CARDS: usize = 32;

/// Deck construction and session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeckConfig {
    /// Number of properties selected for the deck.
    pub max_properties: usize,

    /// Deck size cap.
    pub max_cards: usize,

    /// Image used for items without one.
    pub placeholder_image: String,

    /// Width hint appended to remote image URLs (`?width=`).
    pub image_width: u32,

    /// Unit id of the dimensionless "count" unit; such values get no suffix.
    pub count_unit: String,

    /// SPARQL endpoint queried for facts.
    pub endpoint: String,

    /// Language used when the selection does not name one.
    pub default_language: String,

    /// Topics picked from at random when the selection does not name one.
    pub default_topics: Vec<String>,

    /// Number of candidate items requested from the fact source.
    pub item_limit: usize,
}

impl Default for DeckConfig {
    fn default() -> Self {
        Self {
            max_properties: MAX_PROPERTIES,
            max_cards: MAX_CARDS,
            placeholder_image: "texture.png".to_string(),
            image_width: 1000,
            count_unit: "http://www.wikidata.org/entity/Q199".to_string(),
            endpoint: "https://query.wikidata.org/bigdata/namespace/wdq/sparql".to_string(),
            default_language: "en".to_string(),
            default_topics: ["Q11344", "Q5503", "Q23442", "Q1032372", "Q55990535", "Q35273", "Q142714"]
                .into_iter()
                .map(String::from)
                .collect(),
            item_limit: 100,
        }
    }
}

impl DeckConfig {
    /// Parse a config from TOML. Unspecified keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: DeckConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject configurations that cannot produce a playable deck.
    pub fn validate(&self) -> Result<()> {
        if self.max_properties == 0 {
            return Err(Error::Config("max_properties must be at least 1".into()));
        }
        if self.max_cards == 0 {
            return Err(Error::Config("max_cards must be at least 1".into()));
        }
        if self.item_limit == 0 {
            return Err(Error::Config("item_limit must be at least 1".into()));
        }
        if self.default_topics.is_empty() {
            return Err(Error::Config("default_topics must not be empty".into()));
        }
        if self.default_language.trim().is_empty() {
            return Err(Error::Config("default_language must not be empty".into()));
        }
        Ok(())
    }

    /// Set the number of selected properties.
    pub fn with_max_properties(mut self, count: usize) -> Self {
        self.max_properties = count;
        self
    }

    /// Set the deck size cap.
    pub fn with_max_cards(mut self, count: usize) -> Self {
        self.max_cards = count;
        self
    }

    /// Set the placeholder image.
    pub fn with_placeholder_image(mut self, image: impl Into<String>) -> Self {
        self.placeholder_image = image.into();
        self
    }

    /// Set the SPARQL endpoint.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the default language.
    pub fn with_default_language(mut self, language: impl Into<String>) -> Self {
        self.default_language = language.into();
        self
    }
}
