//! Fact rows: one (item, property, value) observation each.
//!
//! Facts arrive from the fact source as SPARQL JSON bindings, where every
//! column is an object with a `value` field. Rows are decoded once and never
//! mutated afterwards.

use serde::{Deserialize, Serialize};

/// Identifier of an item (an entity URI such as `http://www.wikidata.org/entity/Q90`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ItemId(pub String);

impl ItemId {
    /// Create a new item ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier of a property (a property URI).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PropertyId(pub String);

impl PropertyId {
    /// Create a new property ID.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw ID.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PropertyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// One observation row.
///
/// `precision` is present only for time values; its presence alone selects
/// the time branch of value normalization, even if it does not parse.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Fact {
    pub item: ItemId,
    pub item_label: String,
    pub item_description: Option<String>,
    pub image: Option<String>,
    pub property: PropertyId,
    pub property_label: String,
    /// Raw value text: a decimal for quantities, an ISO-8601 timestamp for times.
    pub value: String,
    pub unit: Option<String>,
    pub unit_label: Option<String>,
    pub precision: Option<String>,
}

impl Fact {
    /// Create a quantity fact without unit, image or description.
    #[must_use]
    pub fn new(
        item: impl Into<String>,
        item_label: impl Into<String>,
        property: impl Into<String>,
        property_label: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            item: ItemId::new(item),
            item_label: item_label.into(),
            item_description: None,
            image: None,
            property: PropertyId::new(property),
            property_label: property_label.into(),
            value: value.into(),
            unit: None,
            unit_label: None,
            precision: None,
        }
    }

    /// Attach a unit (builder pattern).
    #[must_use]
    pub fn with_unit(mut self, unit: impl Into<String>, label: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self.unit_label = Some(label.into());
        self
    }

    /// Attach a date precision, turning this into a time fact.
    #[must_use]
    pub fn with_precision(mut self, precision: impl Into<String>) -> Self {
        self.precision = Some(precision.into());
        self
    }

    /// Attach an image URL.
    #[must_use]
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    /// Attach an item description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.item_description = Some(description.into());
        self
    }

    /// Whether this is a time value.
    #[must_use]
    pub fn is_time(&self) -> bool {
        self.precision.is_some()
    }
}

/// A single SPARQL binding cell.
#[derive(Clone, Debug, Deserialize)]
pub(crate) struct Literal {
    pub value: String,
}

/// Wire shape of one fact row.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct FactBinding {
    item: Literal,
    item_label: Literal,
    #[serde(default)]
    item_description: Option<Literal>,
    #[serde(default)]
    image: Option<Literal>,
    property: Literal,
    property_label: Literal,
    value_label: Literal,
    #[serde(default)]
    unit: Option<Literal>,
    #[serde(default)]
    unit_label: Option<Literal>,
    #[serde(default)]
    precision: Option<Literal>,
}

impl From<FactBinding> for Fact {
    fn from(row: FactBinding) -> Self {
        let value = |lit: Option<Literal>| lit.map(|l| l.value);
        Self {
            item: ItemId(row.item.value),
            item_label: row.item_label.value,
            item_description: value(row.item_description),
            image: value(row.image),
            property: PropertyId(row.property.value),
            property_label: row.property_label.value,
            value: row.value_label.value,
            unit: value(row.unit),
            unit_label: value(row.unit_label),
            precision: value(row.precision),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ids() {
        let id = ItemId::new("http://www.wikidata.org/entity/Q90");
        assert_eq!(id.as_str(), "http://www.wikidata.org/entity/Q90");
        assert_eq!(format!("{}", PropertyId::new("P2046")), "P2046");
    }

    #[test]
    fn test_builder() {
        let fact = Fact::new("Q1", "Paris", "P2046", "area", "105.4")
            .with_unit("http://www.wikidata.org/entity/Q712226", "square kilometre")
            .with_image("http://commons/paris.jpg");

        assert_eq!(fact.item.as_str(), "Q1");
        assert_eq!(fact.unit_label.as_deref(), Some("square kilometre"));
        assert!(!fact.is_time());
        assert!(fact.with_precision("11").is_time());
    }

    #[test]
    fn test_decode_binding() {
        let row = json!({
            "item": { "type": "uri", "value": "http://www.wikidata.org/entity/Q90" },
            "itemLabel": { "xml:lang": "en", "type": "literal", "value": "Paris" },
            "property": { "type": "uri", "value": "http://www.wikidata.org/entity/P571" },
            "propertyLabel": { "type": "literal", "value": "inception" },
            "valueLabel": { "type": "literal", "value": "0300-01-01T00:00:00Z" },
            "precision": { "type": "literal", "value": "7" }
        });

        let binding: FactBinding = serde_json::from_value(row).unwrap();
        let fact = Fact::from(binding);

        assert_eq!(fact.item_label, "Paris");
        assert_eq!(fact.property_label, "inception");
        assert_eq!(fact.precision.as_deref(), Some("7"));
        assert_eq!(fact.image, None);
        assert_eq!(fact.unit, None);
    }

    #[test]
    fn test_decode_binding_missing_required_field() {
        let row = json!({
            "item": { "value": "Q1" },
            "property": { "value": "P1" },
            "propertyLabel": { "value": "mass" },
            "valueLabel": { "value": "3" }
        });

        assert!(serde_json::from_value::<FactBinding>(row).is_err());
    }
}
