//! Per-session context.
//!
//! One `Session` exists per game: it is created when the deck is built and
//! dropped on reload. It replaces page-level globals (current deck, topic
//! label, image progress) with an explicit value.

use super::selection::Selection;
use crate::assets::Progress;
use crate::cards::Deck;

/// Context for one game session.
#[derive(Clone, Debug)]
pub struct Session {
    selection: Selection,
    topic_label: String,
    deck: Deck,
    images_loaded: usize,
}

impl Session {
    /// Create a session for a freshly built deck.
    #[must_use]
    pub fn new(selection: Selection, topic_label: impl Into<String>, deck: Deck) -> Self {
        Self {
            selection,
            topic_label: topic_label.into(),
            deck,
            images_loaded: 0,
        }
    }

    /// Topic and language this session was built for.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Human-readable topic name.
    #[must_use]
    pub fn topic_label(&self) -> &str {
        &self.topic_label
    }

    /// Link to the topic's entity page.
    #[must_use]
    pub fn topic_url(&self) -> String {
        format!("https://www.wikidata.org/wiki/{}", self.selection.topic)
    }

    /// The session's deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// Number of card images loaded so far.
    #[must_use]
    pub fn images_loaded(&self) -> usize {
        self.images_loaded
    }

    /// Whether every card image has loaded.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.images_loaded >= self.deck.len()
    }

    pub(crate) fn record_progress(&mut self, progress: Progress) {
        self.images_loaded = progress.loaded;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TopicId;

    #[test]
    fn test_progress_tracking() {
        let selection = Selection::new(TopicId::parse("Q5").unwrap(), "en");
        let mut session = Session::new(selection, "human", Deck::default());

        assert_eq!(session.topic_label(), "human");
        assert_eq!(session.topic_url(), "https://www.wikidata.org/wiki/Q5");
        assert!(session.is_ready());

        session.record_progress(Progress { loaded: 3, total: 4 });
        assert_eq!(session.images_loaded(), 3);
    }
}
