//! # top-trumps
//!
//! Builds a "top trumps" card deck from a flat table of knowledge-base facts
//! and runs a two-card comparison game over it.
//!
//! ## Design Principles
//!
//! 1. **Facts In, Deck Out**: Deck construction is a pure function of the fact
//!    rows and a `DeckConfig`. No network, no globals.
//!
//! 2. **Display vs Numeric**: Every property value carries a human-readable
//!    display string and an orthogonal comparable number. Comparisons never
//!    look at the display text.
//!
//! 3. **Stable Ordering**: Property and item grouping use insertion-ordered
//!    maps, so every tie-break is "first seen in the input wins".
//!
//! ## Pipeline
//!
//! ```text
//! FactSource ──► PropertySelector ──► DeckBuilder ──► AssetGate ──► GameEngine
//!  (rows)          (top-K props)       (ranked deck)   (preload)     (rounds)
//! ```
//!
//! ## Modules
//!
//! - `core`: Facts, selection inputs, configuration, RNG, session context
//! - `cards`: Cards, property values, value normalization, the deck
//! - `builder`: Property selection and deck construction
//! - `source`: Fact source trait, query texts, SPARQL client
//! - `assets`: Image preloading gate
//! - `game`: Round state machine and view models
//! - `pipeline`: Fetch → build → preload → play stages

pub mod core;
pub mod cards;
pub mod builder;
pub mod source;
pub mod assets;
pub mod game;
pub mod pipeline;

// Re-export commonly used types
pub use crate::core::{
    DeckConfig, DrawSource, Fact, GameRng, GameRngState, ItemId, PropertyId, Selection, Session, TopicId,
};

pub use crate::cards::{Card, Deck, Normalized, PropertyValue, ValueNormalizer};

pub use crate::builder::{DeckBuilder, PropertySelector, PropertyStat, SelectedProperty};

pub use crate::source::{FactSource, LanguageOption, StaticFactSource};

#[cfg(feature = "http")]
pub use crate::source::SparqlClient;

pub use crate::assets::{AssetGate, ImageLoader, Progress};

#[cfg(feature = "http")]
pub use crate::assets::HttpImageLoader;

pub use crate::game::{CardView, Comparison, GameEngine, Phase, PropertyRow, Round, RoundView, Side, Transition};

pub use crate::pipeline::{Pipeline, Status};

// ============================================================================
// Errors
// ============================================================================

/// Coarse classification of [`Error`] for status display and metrics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The fact query could not be completed.
    SourceUnavailable,
    /// A card image could not be loaded.
    AssetUnavailable,
    /// The game could not start or an interaction was invalid.
    Game,
    /// Configuration or selection input was rejected.
    Config,
}

/// Crate error type.
///
/// There is no retry anywhere: every variant ends the current session and
/// recovery is left to the caller (typically "reload").
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("fact source returned status {status}")]
    SourceStatus { status: u16 },

    #[error("fact source request failed: {0}")]
    SourceUnavailable(String),

    #[error("malformed fact source response: {0}")]
    MalformedResponse(String),

    #[error("error loading {url}: {cause}")]
    AssetUnavailable { url: String, cause: String },

    #[error("deck has no cards")]
    EmptyDeck,

    #[error("property index {index} out of range ({count} properties)")]
    PropertyOutOfRange { index: usize, count: usize },

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Classify this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::SourceStatus { .. } | Error::SourceUnavailable(_) | Error::MalformedResponse(_) => {
                ErrorKind::SourceUnavailable
            }
            Error::AssetUnavailable { .. } => ErrorKind::AssetUnavailable,
            Error::EmptyDeck | Error::PropertyOutOfRange { .. } => ErrorKind::Game,
            Error::Config(_) => ErrorKind::Config,
        }
    }

    /// User-facing status line for this error.
    #[must_use]
    pub fn status_message(&self) -> String {
        match self {
            Error::SourceStatus { status } => format!(
                "The query took too long or failed. This is probably a bug, let us know! (Status code: {status})"
            ),
            Error::SourceUnavailable(cause) | Error::MalformedResponse(cause) => {
                format!("An error occurred while running the query: \"{cause}\"")
            }
            Error::AssetUnavailable { url, cause } => {
                format!("An error occurred while generating the cards: Error loading {url} ({cause})")
            }
            other => other.to_string(),
        }
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
