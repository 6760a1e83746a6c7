//! End-to-end session tests.
//!
//! Facts come from canned SPARQL rows and images from an in-memory loader,
//! so the whole fetch → build → preload → play path runs offline.

use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{json, Value};
use top_trumps::core::TopicId;
use top_trumps::{
    DeckConfig, Error, ErrorKind, FactSource, GameRng, ImageLoader, Pipeline, Result, Selection, StaticFactSource,
    Status, Transition,
};

/// Records every requested image; fails the ones listed.
#[derive(Default)]
struct MemoryLoader {
    broken: Vec<String>,
    requested: Mutex<Vec<String>>,
}

#[async_trait]
impl ImageLoader for MemoryLoader {
    async fn load(&self, url: &str) -> Result<()> {
        self.requested.lock().unwrap().push(url.to_string());
        if self.broken.iter().any(|b| b == url) {
            return Err(Error::AssetUnavailable {
                url: url.to_string(),
                cause: "404 Not Found".into(),
            });
        }
        Ok(())
    }
}

/// A source whose every query fails.
struct DownSource;

#[async_trait]
impl FactSource for DownSource {
    async fn select(&self, _query: &str) -> Result<Vec<Value>> {
        Err(Error::SourceStatus { status: 500 })
    }
}

fn row(item: &str, label: &str, property_label: &str, value: &str, image: Option<&str>) -> Value {
    let mut row = json!({
        "item": { "value": format!("http://www.wikidata.org/entity/{item}") },
        "itemLabel": { "value": label },
        "property": { "value": format!("http://www.wikidata.org/prop/{property_label}") },
        "propertyLabel": { "value": property_label },
        "valueLabel": { "value": value },
    });
    if let Some(image) = image {
        row["image"] = json!({ "value": image });
    }
    row
}

fn mountains() -> StaticFactSource {
    StaticFactSource::new().with_topic_label("mountain").with_facts(vec![
        row("Q513", "mount everest", "elevation", "8848", Some("http://commons/everest.jpg")),
        row("Q513", "mount everest", "prominence", "8848", Some("http://commons/everest.jpg")),
        row("Q1374", "k2", "elevation", "8611", None),
        row("Q1374", "k2", "prominence", "4020", None),
        row("Q3392", "mont blanc", "elevation", "4808", Some("http://commons/blanc.jpg")),
    ])
}

fn selection() -> Selection {
    Selection::new(TopicId::parse("Q8502").unwrap(), "en")
}

/// Test a full session from query to first round.
#[tokio::test]
async fn test_session_reaches_play() {
    let pipeline = Pipeline::new(mountains(), MemoryLoader::default(), DeckConfig::default()).unwrap();
    let mut messages = Vec::new();

    let (session, mut engine) = pipeline
        .start(selection(), GameRng::new(1), |status, label| messages.push(status.message(label)))
        .await
        .unwrap();

    assert_eq!(session.topic_label(), "mountain");
    assert_eq!(session.deck().len(), 3);
    assert!(session.is_ready());
    assert_eq!(session.deck().get(2).unwrap().label, "mont blanc");

    assert_eq!(messages.first().map(String::as_str), Some("mountain Generating..."));
    assert!(messages.contains(&"mountain Preparing 3 of 3 cards".to_string()));
    assert_eq!(messages.last().map(String::as_str), Some("mountain Play!"));
    assert!(matches!(engine.select_property(0).unwrap(), Transition::Revealed(_)));
}

/// Test that each card image is requested exactly once.
#[tokio::test]
async fn test_images_requested_once_per_card() {
    let pipeline = Pipeline::new(mountains(), MemoryLoader::default(), DeckConfig::default()).unwrap();
    pipeline.prepare(selection(), |_, _| {}).await.unwrap();

    let mut requested = pipeline.loader().requested.lock().unwrap().clone();
    requested.sort();
    assert_eq!(
        requested,
        vec![
            "https://commons/blanc.jpg?width=1000",
            "https://commons/everest.jpg?width=1000",
            "texture.png",
        ]
    );
}

/// Test that a failing fact source stops the session.
#[tokio::test]
async fn test_source_failure_stops_session() {
    let pipeline = Pipeline::new(DownSource, MemoryLoader::default(), DeckConfig::default()).unwrap();
    let mut statuses = Vec::new();

    let err = pipeline.prepare(selection(), |status, _| statuses.push(status)).await.unwrap_err();

    assert!(matches!(err, Error::SourceStatus { status: 500 }));
    assert_eq!(err.kind(), ErrorKind::SourceUnavailable);
    assert!(statuses.is_empty());
}

/// Test that a failing image stops the session.
#[tokio::test]
async fn test_image_failure_stops_session() {
    let loader = MemoryLoader {
        broken: vec!["https://commons/blanc.jpg?width=1000".into()],
        ..MemoryLoader::default()
    };
    let pipeline = Pipeline::new(mountains(), loader, DeckConfig::default()).unwrap();
    let mut statuses = Vec::new();

    let err = pipeline.prepare(selection(), |status, _| statuses.push(status)).await.unwrap_err();

    match &err {
        Error::AssetUnavailable { url, cause } => {
            assert_eq!(url, "https://commons/blanc.jpg?width=1000");
            assert_eq!(cause, "404 Not Found");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.status_message().contains("Error loading https://commons/blanc.jpg?width=1000"));
    assert!(!statuses.contains(&Status::Ready));
}

/// Test an unknown topic with no facts.
#[tokio::test]
async fn test_unknown_topic_has_no_cards() {
    let source = StaticFactSource::new();
    let pipeline = Pipeline::new(source, MemoryLoader::default(), DeckConfig::default()).unwrap();
    let mut labels = Vec::new();

    let err = pipeline
        .prepare(selection(), |_, label| labels.push(label.to_string()))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::EmptyDeck));
    // No label rows: the topic id stands in
    assert_eq!(labels, vec!["Q8502"]);
}

/// Test listing the playable languages.
#[tokio::test]
async fn test_languages() {
    let source = StaticFactSource::new().respond(
        "wdt:P424",
        vec![json!({
            "code": { "value": "de" },
            "itemLabel": { "value": "German" },
            "nativeLabels": { "value": "Deutsch" },
        })],
    );
    let pipeline = Pipeline::new(source, MemoryLoader::default(), DeckConfig::default()).unwrap();

    let languages = pipeline.languages().await.unwrap();
    assert_eq!(languages.len(), 1);
    assert_eq!(languages[0].display(), "German (de) – Deutsch");
}

/// Test that an invalid config is rejected.
#[test]
fn test_invalid_config_rejected() {
    let config = DeckConfig::default().with_max_cards(0);
    assert!(matches!(
        Pipeline::new(mountains(), MemoryLoader::default(), config),
        Err(Error::Config(_))
    ));
}
