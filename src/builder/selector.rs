//! Property selection by distinct-item coverage.

use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::{DeckConfig, Fact, ItemId, PropertyId};

/// Coverage of one property across the fact rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PropertyStat {
    pub id: PropertyId,
    /// Label of the first fact seen for this property.
    pub label: String,
    /// Number of distinct items with at least one value.
    pub item_count: usize,
}

/// A property chosen to appear on every card.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedProperty {
    pub id: PropertyId,
    pub label: String,
    pub item_count: usize,
}

impl From<PropertyStat> for SelectedProperty {
    fn from(stat: PropertyStat) -> Self {
        Self {
            id: stat.id,
            label: stat.label,
            item_count: stat.item_count,
        }
    }
}

/// Picks the top-K properties by distinct-item count.
#[derive(Clone, Copy, Debug)]
pub struct PropertySelector {
    max_properties: usize,
}

impl PropertySelector {
    /// Create a selector keeping at most `max_properties` properties.
    #[must_use]
    pub fn new(max_properties: usize) -> Self {
        Self { max_properties }
    }

    /// Create a selector from deck configuration.
    #[must_use]
    pub fn from_config(config: &DeckConfig) -> Self {
        Self::new(config.max_properties)
    }

    /// Coverage of every property, in first-appearance order.
    ///
    /// Several facts for the same item and property count once.
    #[must_use]
    pub fn stats(&self, facts: &[Fact]) -> Vec<PropertyStat> {
        let mut groups: IndexMap<&PropertyId, (&str, FxHashSet<&ItemId>)> = IndexMap::new();
        for fact in facts {
            groups
                .entry(&fact.property)
                .or_insert_with(|| (fact.property_label.as_str(), FxHashSet::default()))
                .1
                .insert(&fact.item);
        }

        groups
            .into_iter()
            .map(|(id, (label, items))| PropertyStat {
                id: id.clone(),
                label: label.to_string(),
                item_count: items.len(),
            })
            .collect()
    }

    /// Select the most widely covered properties.
    ///
    /// Sorted by item count, descending; ties keep first-appearance order.
    #[must_use]
    pub fn select(&self, facts: &[Fact]) -> Vec<SelectedProperty> {
        let mut stats = self.stats(facts);
        let candidates = stats.len();

        // Stable: equal counts stay in first-appearance order
        stats.sort_by(|a, b| b.item_count.cmp(&a.item_count));
        stats.truncate(self.max_properties);

        debug!(
            candidates,
            selected = stats.len(),
            properties = ?stats.iter().map(|s| s.label.as_str()).collect::<Vec<_>>(),
            "selected deck properties"
        );

        stats.into_iter().map(SelectedProperty::from).collect()
    }
}

impl Default for PropertySelector {
    fn default() -> Self {
        Self::from_config(&DeckConfig::default())
    }
}
