//! Topic and language selection.
//!
//! A session is parameterized by a topic (a `Q<digits>` entity id) and a
//! language code. Both normally come from the page's query string; missing
//! values fall back to the configured defaults.

use serde::{Deserialize, Serialize};
use url::form_urlencoded;

use super::config::DeckConfig;
use super::rng::DrawSource;
use crate::{Error, Result};

/// Topic entity id, always of the form `Q<digits>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TopicId(String);

impl TopicId {
    /// Parse a topic id. Returns `None` unless the text is exactly `Q<digits>`.
    #[must_use]
    pub fn parse(text: &str) -> Option<Self> {
        let digits = text.strip_prefix('Q')?;
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(text.to_string()))
        } else {
            None
        }
    }

    /// Find the first `Q<digits>` token anywhere in `text`.
    #[must_use]
    pub fn find_in(text: &str) -> Option<Self> {
        let bytes = text.as_bytes();
        for (start, &b) in bytes.iter().enumerate() {
            if b != b'Q' {
                continue;
            }
            let len = bytes[start + 1..].iter().take_while(|c| c.is_ascii_digit()).count();
            if len > 0 {
                return Some(Self(text[start..=start + len].to_string()));
            }
        }
        None
    }

    /// Get the raw id.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TopicId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Topic and language for one session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    pub topic: TopicId,
    pub language: String,
}

impl Selection {
    /// Create a selection.
    #[must_use]
    pub fn new(topic: TopicId, language: impl Into<String>) -> Self {
        Self {
            topic,
            language: language.into(),
        }
    }

    /// Read a selection from a query string such as `?Q5503&lang=de`.
    ///
    /// The first `Q<digits>` token is the topic; `lang` is the language,
    /// form-decoded (`%2D` → `-`, `+` → space). A missing or empty language
    /// uses `config.default_language`; a missing topic is drawn uniformly
    /// from `config.default_topics`.
    ///
    /// The language ends up inside a quoted query literal, so a `"` or `\`
    /// in it is rejected with `Error::Config`.
    pub fn from_query_string<R: DrawSource>(query: &str, config: &DeckConfig, rng: &mut R) -> Result<Self> {
        let language = query_param(query, "lang")
            .filter(|lang| !lang.is_empty())
            .unwrap_or_else(|| config.default_language.clone());
        if language.contains(&['"', '\\'][..]) {
            return Err(Error::Config(format!("invalid language {language:?}")));
        }

        let topic = match TopicId::find_in(query) {
            Some(topic) => topic,
            None => Self::default_topic(config, rng)?,
        };

        Ok(Self { topic, language })
    }

    /// Draw one of the configured default topics.
    pub fn default_topic<R: DrawSource>(config: &DeckConfig, rng: &mut R) -> Result<TopicId> {
        if config.default_topics.is_empty() {
            return Err(Error::Config("no default topics configured".into()));
        }
        let raw = &config.default_topics[rng.pick(config.default_topics.len())];
        TopicId::parse(raw).ok_or_else(|| Error::Config(format!("invalid default topic {raw:?}")))
    }

    /// Render back into the query string form used for reloads.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let language: String = form_urlencoded::byte_serialize(self.language.as_bytes()).collect();
        format!("?{}&lang={language}", self.topic)
    }
}

fn query_param(query: &str, key: &str) -> Option<String> {
    form_urlencoded::parse(query.trim_start_matches('?').as_bytes())
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
}
