//! SPARQL query texts.
//!
//! The endpoint receives the query verbatim in the `query` parameter. Only
//! `%` and `&` need escaping there: `%` because the deck query names a
//! named subquery `%items`, `&` because it would end the parameter.

use crate::core::TopicId;

/// Restriction selecting items that are instances, occupations or positions
/// of the topic (or of its subclasses / taxa).
#[must_use]
pub fn topic_restriction(topic: &TopicId) -> String {
    format!("?item (wdt:P31|wdt:P106|wdt:P39)/(wdt:P279*|wdt:P171*) wd:{topic}.")
}

/// Query returning every quantity and time statement of the topic's
/// `item_limit` best-described items, labelled in `language`.
#[must_use]
pub fn deck_query(topic: &TopicId, language: &str, item_limit: usize) -> String {
    let restriction = topic_restriction(topic);
    format!(
        r#"
    SELECT ?item ?itemLabel ?itemDescription ?image ?property ?propertyLabel ?valueLabel ?unit ?unitLabel ?precision WITH {{
      SELECT DISTINCT ?item WHERE {{
        {restriction}
        ?item wikibase:statements ?statements.
      }}
      ORDER BY DESC(?statements)
      LIMIT {item_limit}
    }} AS %items
    WHERE {{
      INCLUDE %items.

      SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{language}". }}

      OPTIONAL {{ ?item wdt:P18 ?image. }}

      ?item ?p ?statement.
      ?statement a wikibase:BestRank.

      ?property wikibase:claim ?p.
      ?property rdf:type wikibase:Property .

      {{
        ?property wikibase:propertyType wikibase:Quantity.

        ?statement ?psn ?valueNode.
        ?valueNode wikibase:quantityAmount ?value.
        ?valueNode wikibase:quantityUnit ?unit.

        ?property wikibase:statementValue ?psn.
      }} UNION {{
        ?property wikibase:propertyType wikibase:Time.

        ?statement ?psn ?valueNode.
        ?valueNode wikibase:timeValue ?value.
        ?valueNode wikibase:timePrecision ?precision.

        ?property wikibase:statementValue ?psn.
      }}
    }}
    "#
    )
}

/// Query returning the topic's label in `language` as `?itemLabel`.
#[must_use]
pub fn topic_label_query(topic: &TopicId, language: &str) -> String {
    format!(
        r#"
    SELECT ?itemLabel WHERE {{
      BIND(wd:{topic} as ?item)
      SERVICE wikibase:label {{ bd:serviceParam wikibase:language "{language}". }}
    }}
    "#
    )
}

/// Query listing natural languages with a code and native names.
#[must_use]
pub fn language_query() -> &'static str {
    r#"
    SELECT ?item ?code ?itemLabel (GROUP_CONCAT(?nativeLabel;separator="/") as ?nativeLabels) WHERE {
      ?item wdt:P424 ?code.
      ?item wdt:P1705 ?nativeLabel.

      MINUS { ?item (wdt:P31/wdt:P279*) wd:Q14827288. }
      MINUS { ?item (wdt:P31/wdt:P279*) wd:Q17442446. }
      MINUS { ?item wdt:P279+ wd:Q1860. }
      FILTER(?item != wd:Q22282939 && ?item != wd:Q22282914)
      SERVICE wikibase:label { bd:serviceParam wikibase:language "en". }
    }
    GROUP BY ?item ?code ?itemLabel
    ORDER BY ?itemLabel
    "#
}

/// Escape `%` and `&` for use as the `query` URL parameter.
#[must_use]
pub fn encode_query(query: &str) -> String {
    query.replace('%', "%25").replace('&', "%26")
}
