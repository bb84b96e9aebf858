//! Selectable filter values (facets)

use super::predicate::Dimension;
use super::transaction::split_tags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Stored column whose distinct values make up a facet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FacetColumn {
    Gender,
    Region,
    Category,
    PaymentMethod,
    /// Raw comma-joined tag strings; flattened by [`flatten_tags`]
    Tags,
}

impl FacetColumn {
    /// Filter dimension the facet feeds
    pub fn dimension(self) -> Dimension {
        match self {
            FacetColumn::Gender => Dimension::Gender,
            FacetColumn::Region => Dimension::Region,
            FacetColumn::Category => Dimension::Category,
            FacetColumn::PaymentMethod => Dimension::PaymentMethod,
            FacetColumn::Tags => Dimension::Tags,
        }
    }

    pub fn column(self) -> &'static str {
        self.dimension().columns()[0]
    }
}

/// Distinct values for every filterable dimension over the whole dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub regions: Vec<String>,
    pub genders: Vec<String>,
    pub categories: Vec<String>,
    pub tags: Vec<String>,
    pub payment_methods: Vec<String>,
}

/// Sorted, deduplicated, non-empty values
pub fn distinct_sorted<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values
        .into_iter()
        .filter(|v| !v.as_ref().is_empty())
        .map(|v| v.as_ref().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Split raw tag strings on commas, trim, drop empties and deduplicate
pub fn flatten_tags<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut tags = BTreeSet::new();
    for tag_string in raw {
        tags.extend(split_tags(tag_string.as_ref()).map(String::from));
    }
    tags.into_iter().collect()
}
