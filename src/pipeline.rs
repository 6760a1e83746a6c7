//! # Session Pipeline
//!
//! Fetch → build → preload → play, as awaitable stages. Each stage either
//! hands a typed value to the next or ends the session with an [`Error`];
//! there is no partial start.
//!
//! ```text
//! topic label ──► facts ──► Deck ──► images ──► GameEngine
//!   Generating...            Preparing i of n     Play!
//! ```

use tracing::{debug, info, warn};

use crate::assets::{AssetGate, ImageLoader, Progress};
use crate::builder::DeckBuilder;
use crate::core::{DeckConfig, DrawSource, Selection, Session};
use crate::game::GameEngine;
use crate::source::{self, FactSource, LanguageOption};
use crate::{Error, Result};

/// Progress of a session being prepared.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    /// Fetching facts and building the deck.
    Generating,
    /// Loading card images.
    Preparing { loaded: usize, total: usize },
    /// Everything loaded; the first round is drawn.
    Ready,
}

impl Status {
    /// Status line, prefixed with the topic label.
    #[must_use]
    pub fn message(&self, topic_label: &str) -> String {
        match self {
            Status::Generating => format!("{topic_label} Generating..."),
            Status::Preparing { loaded, total } => {
                format!("{topic_label} Preparing {loaded} of {total} cards")
            }
            Status::Ready => format!("{topic_label} Play!"),
        }
    }
}

impl From<Progress> for Status {
    fn from(progress: Progress) -> Self {
        Status::Preparing {
            loaded: progress.loaded,
            total: progress.total,
        }
    }
}

/// Runs the stages for one selection at a time.
pub struct Pipeline<S, L> {
    source: S,
    gate: AssetGate<L>,
    builder: DeckBuilder,
    config: DeckConfig,
}

impl<S: FactSource, L: ImageLoader> Pipeline<S, L> {
    /// Create a pipeline. Fails if the config does not validate.
    pub fn new(source: S, loader: L, config: DeckConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            source,
            gate: AssetGate::new(loader),
            builder: DeckBuilder::new(&config),
            config,
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// The fact source.
    #[must_use]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The image loader.
    #[must_use]
    pub fn loader(&self) -> &L {
        self.gate.loader()
    }

    /// Languages the game can be played in.
    pub async fn languages(&self) -> Result<Vec<LanguageOption>> {
        source::fetch_languages(&self.source).await
    }

    /// Build a session whose card images are all loaded.
    ///
    /// `on_status` receives each status together with the topic label.
    /// `Ready` is only reported on success.
    pub async fn prepare<F>(&self, selection: Selection, mut on_status: F) -> Result<Session>
    where
        F: FnMut(Status, &str),
    {
        let label = source::fetch_topic_label(&self.source, &selection).await?;
        info!(topic = %selection.topic, language = %selection.language, label = %label, "generating deck");
        on_status(Status::Generating, &label);

        let facts = source::fetch_facts(&self.source, &selection, self.config.item_limit).await?;
        let deck = self.builder.build(&facts);
        if deck.is_empty() {
            warn!(topic = %selection.topic, facts = facts.len(), "no cards for topic");
            return Err(Error::EmptyDeck);
        }

        let mut session = Session::new(selection, label.as_str(), deck.clone());
        on_status(Status::Preparing { loaded: 0, total: deck.len() }, &label);

        self.gate
            .preload(&deck, |progress| {
                session.record_progress(progress);
                on_status(progress.into(), &label);
            })
            .await?;

        debug!(cards = deck.len(), "session ready");
        on_status(Status::Ready, &label);
        Ok(session)
    }

    /// Prepare a session and draw the first round.
    pub async fn start<R, F>(&self, selection: Selection, rng: R, on_status: F) -> Result<(Session, GameEngine<R>)>
    where
        R: DrawSource,
        F: FnMut(Status, &str),
    {
        let session = self.prepare(selection, on_status).await?;
        let engine = GameEngine::new(session.deck().clone(), rng)?;
        Ok((session, engine))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_messages() {
        assert_eq!(Status::Generating.message("human"), "human Generating...");
        assert_eq!(
            Status::Preparing { loaded: 3, total: 32 }.message("human"),
            "human Preparing 3 of 32 cards"
        );
        assert_eq!(Status::Ready.message("human"), "human Play!");
    }

    #[test]
    fn test_status_from_progress() {
        assert_eq!(
            Status::from(Progress { loaded: 1, total: 2 }),
            Status::Preparing { loaded: 1, total: 2 }
        );
    }
}
