//! HTTP client for a SPARQL endpoint.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::query::encode_query;
use super::FactSource;
use crate::core::DeckConfig;
use crate::{Error, Result};

#[derive(Deserialize)]
struct SparqlResponse {
    results: SparqlResults,
}

#[derive(Deserialize)]
struct SparqlResults {
    bindings: Vec<Value>,
}

/// Fact source issuing `GET <endpoint>?format=json&query=...`.
///
/// No timeout is set: a hanging endpoint keeps the caller waiting.
#[derive(Clone, Debug)]
pub struct SparqlClient {
    client: Client,
    endpoint: String,
}

impl SparqlClient {
    /// Create a client for an endpoint.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_client(Client::new(), endpoint)
    }

    /// Create a client for the configured endpoint.
    #[must_use]
    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(config.endpoint.clone())
    }

    /// Create a client reusing an existing `reqwest::Client`.
    #[must_use]
    pub fn with_client(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    /// Full request URL for a query.
    #[must_use]
    pub fn request_url(&self, query: &str) -> String {
        format!("{}?format=json&query={}", self.endpoint, encode_query(query))
    }
}

#[async_trait]
impl FactSource for SparqlClient {
    async fn select(&self, query: &str) -> Result<Vec<Value>> {
        let url = self.request_url(query);
        debug!(endpoint = %self.endpoint, query_len = query.len(), "running query");

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!(error = %e, "query request failed");
            Error::SourceUnavailable(e.to_string())
        })?;

        let status = response.status();
        if status != StatusCode::OK {
            warn!(status = status.as_u16(), "query returned non-success status");
            return Err(Error::SourceStatus { status: status.as_u16() });
        }

        let payload: SparqlResponse = response
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;

        debug!(rows = payload.results.bindings.len(), "query finished");
        Ok(payload.results.bindings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_url() {
        let client = SparqlClient::new("https://query.example.org/sparql");
        assert_eq!(
            client.request_url("SELECT * WHERE { ?a ?b %c . FILTER(1 && 2) }"),
            "https://query.example.org/sparql?format=json&query=SELECT * WHERE { ?a ?b %25c . FILTER(1 %26%26 2) }"
        );
    }

    #[test]
    fn test_from_config() {
        let client = SparqlClient::from_config(&DeckConfig::default());
        assert!(client
            .request_url("x")
            .starts_with("https://query.wikidata.org/bigdata/namespace/wdq/sparql?format=json&query="));
    }

    #[test]
    fn test_response_shape() {
        let payload: SparqlResponse = serde_json::from_str(
            r#"{ "head": { "vars": ["item"] }, "results": { "bindings": [ { "item": { "value": "Q1" } } ] } }"#,
        )
        .unwrap();
        assert_eq!(payload.results.bindings.len(), 1);
    }
}
