//! # Fact Source
//!
//! The contract between the game and whatever answers SPARQL queries.
//! A source takes query text and returns the raw `results.bindings` rows;
//! decoding into typed rows happens here, not in the source.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `SparqlClient` | `sparql` | HTTP GET against a SPARQL endpoint (`http` feature) |
//! | `StaticFactSource` | here | Canned rows, for tests and offline play |

pub mod query;
#[cfg(feature = "http")]
pub mod sparql;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::core::fact::{FactBinding, Literal};
use crate::core::{Fact, Selection};
use crate::{Error, Result};

#[cfg(feature = "http")]
pub use sparql::SparqlClient;

/// Anything that can answer a SPARQL SELECT query.
#[async_trait]
pub trait FactSource: Send + Sync {
    /// Run a query and return its binding rows.
    ///
    /// Non-success responses and unparseable payloads are errors; there is
    /// no retry.
    async fn select(&self, query: &str) -> Result<Vec<Value>>;
}

/// Decode binding rows into typed rows.
pub fn decode_rows<T: DeserializeOwned>(rows: Vec<Value>) -> Result<Vec<T>> {
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| Error::MalformedResponse(e.to_string())))
        .collect()
}

/// Fetch the fact rows for a selection.
pub async fn fetch_facts<S: FactSource + ?Sized>(source: &S, selection: &Selection, item_limit: usize) -> Result<Vec<Fact>> {
    let query = query::deck_query(&selection.topic, &selection.language, item_limit);
    let rows = source.select(&query).await?;
    let facts: Vec<Fact> = decode_rows::<FactBinding>(rows)?.into_iter().map(Fact::from).collect();
    debug!(topic = %selection.topic, facts = facts.len(), "fetched facts");
    Ok(facts)
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LabelBinding {
    item_label: Literal,
}

/// Fetch the topic's label. Falls back to the topic id when the source
/// returns no rows.
pub async fn fetch_topic_label<S: FactSource + ?Sized>(source: &S, selection: &Selection) -> Result<String> {
    let query = query::topic_label_query(&selection.topic, &selection.language);
    let rows = source.select(&query).await?;
    let label = decode_rows::<LabelBinding>(rows)?
        .into_iter()
        .next()
        .map_or_else(|| selection.topic.to_string(), |row| row.item_label.value);
    Ok(label)
}

/// A language the game can be played in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageOption {
    pub code: String,
    pub label: String,
    /// Native names, `/`-separated.
    pub native_labels: String,
}

impl LanguageOption {
    /// Maximum length of the option text.
    pub const DISPLAY_WIDTH: usize = 40;

    /// Option text: `"<label> (<code>) – <native names>"`, truncated with `…`.
    #[must_use]
    pub fn display(&self) -> String {
        let full = format!("{} ({}) – {}", self.label, self.code, self.native_labels);
        if full.chars().count() > Self::DISPLAY_WIDTH {
            let mut short: String = full.chars().take(Self::DISPLAY_WIDTH - 1).collect();
            short.push('…');
            short
        } else {
            full
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LanguageBinding {
    code: Literal,
    item_label: Literal,
    native_labels: Literal,
}

/// Fetch the list of selectable languages.
pub async fn fetch_languages<S: FactSource + ?Sized>(source: &S) -> Result<Vec<LanguageOption>> {
    let rows = source.select(query::language_query()).await?;
    Ok(decode_rows::<LanguageBinding>(rows)?
        .into_iter()
        .map(|row| LanguageOption {
            code: row.code.value,
            label: row.item_label.value,
            native_labels: row.native_labels.value,
        })
        .collect())
}

/// Fact source answering from canned rows.
///
/// Each route pairs a query fragment with the rows to return; the first
/// route whose fragment occurs in the query wins. Unmatched queries return
/// no rows.
#[derive(Clone, Debug, Default)]
pub struct StaticFactSource {
    routes: Vec<(String, Vec<Value>)>,
}

impl StaticFactSource {
    /// Create a source with no routes.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer queries containing `fragment` with `rows` (builder pattern).
    #[must_use]
    pub fn respond(mut self, fragment: impl Into<String>, rows: Vec<Value>) -> Self {
        self.routes.push((fragment.into(), rows));
        self
    }

    /// Answer deck queries with `rows`.
    #[must_use]
    pub fn with_facts(self, rows: Vec<Value>) -> Self {
        self.respond("wikibase:statements", rows)
    }

    /// Answer topic label queries with a single label.
    #[must_use]
    pub fn with_topic_label(self, label: &str) -> Self {
        self.respond("BIND(wd:", vec![serde_json::json!({ "itemLabel": { "value": label } })])
    }
}

#[async_trait]
impl FactSource for StaticFactSource {
    async fn select(&self, query: &str) -> Result<Vec<Value>> {
        Ok(self
            .routes
            .iter()
            .find(|(fragment, _)| query.contains(fragment.as_str()))
            .map(|(_, rows)| rows.clone())
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::TopicId;
    use serde_json::json;

    fn selection() -> Selection {
        Selection::new(TopicId::parse("Q11344").unwrap(), "en")
    }

    fn row(item: &str, value: &str) -> Value {
        json!({
            "item": { "value": item },
            "itemLabel": { "value": "hydrogen" },
            "property": { "value": "P2067" },
            "propertyLabel": { "value": "mass" },
            "valueLabel": { "value": value },
            "unit": { "value": "http://www.wikidata.org/entity/Q483261" },
            "unitLabel": { "value": "dalton" }
        })
    }

    #[tokio::test]
    async fn test_fetch_facts() {
        let source = StaticFactSource::new().with_facts(vec![row("Q556", "1.008"), row("Q560", "4.0026")]);

        let facts = fetch_facts(&source, &selection(), 100).await.unwrap();
        assert_eq!(facts.len(), 2);
        assert_eq!(facts[0].item.as_str(), "Q556");
        assert_eq!(facts[1].value, "4.0026");
        assert_eq!(facts[0].unit_label.as_deref(), Some("dalton"));
    }

    #[tokio::test]
    async fn test_malformed_rows() {
        let source = StaticFactSource::new().with_facts(vec![json!({ "item": { "value": "Q1" } })]);

        let err = fetch_facts(&source, &selection(), 100).await.unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_topic_label() {
        let source = StaticFactSource::new().with_topic_label("chemical element");
        assert_eq!(fetch_topic_label(&source, &selection()).await.unwrap(), "chemical element");
    }

    #[tokio::test]
    async fn test_topic_label_falls_back_to_id() {
        let source = StaticFactSource::new();
        assert_eq!(fetch_topic_label(&source, &selection()).await.unwrap(), "Q11344");
    }

    #[tokio::test]
    async fn test_languages() {
        let source = StaticFactSource::new().respond(
            "wdt:P424",
            vec![json!({
                "item": { "value": "http://www.wikidata.org/entity/Q188" },
                "code": { "value": "de" },
                "itemLabel": { "value": "German" },
                "nativeLabels": { "value": "Deutsch" }
            })],
        );

        let languages = fetch_languages(&source).await.unwrap();
        assert_eq!(languages.len(), 1);
        assert_eq!(languages[0].code, "de");
        assert_eq!(languages[0].display(), "German (de) – Deutsch");
    }

    #[test]
    fn test_language_display_truncates() {
        let option = LanguageOption {
            code: "zh".into(),
            label: "Chinese".into(),
            native_labels: "中文/汉语/漢語/华语/華語/中国话/中國話/国语/國語".into(),
        };

        let display = option.display();
        assert_eq!(display.chars().count(), LanguageOption::DISPLAY_WIDTH);
        assert!(display.ends_with('…'));
        assert!(display.starts_with("Chinese (zh) – 中文"));
    }
}
