//! Filtering and sorting of compatible parts.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::catalog::CompatiblePart;
use crate::error::CommerceError;

/// Sort options for a parts listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum PartSort {
    /// Catalog order.
    #[default]
    Relevance,
    /// Price, low to high.
    PriceLow,
    /// Price, high to low.
    PriceHigh,
    /// Name A-Z.
    Name,
}

impl PartSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartSort::Relevance => "relevance",
            PartSort::PriceLow => "price-low",
            PartSort::PriceHigh => "price-high",
            PartSort::Name => "name",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            PartSort::Relevance => "Relevance",
            PartSort::PriceLow => "Price: Low to High",
            PartSort::PriceHigh => "Price: High to Low",
            PartSort::Name => "Name: A-Z",
        }
    }

    fn compare(&self, a: &CompatiblePart, b: &CompatiblePart) -> Ordering {
        match self {
            PartSort::Relevance => Ordering::Equal,
            PartSort::PriceLow => a.price.amount_minor.cmp(&b.price.amount_minor),
            PartSort::PriceHigh => b.price.amount_minor.cmp(&a.price.amount_minor),
            PartSort::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        }
    }
}

impl FromStr for PartSort {
    type Err = CommerceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "relevance" => Ok(PartSort::Relevance),
            "price-low" => Ok(PartSort::PriceLow),
            "price-high" => Ok(PartSort::PriceHigh),
            "name" => Ok(PartSort::Name),
            other => Err(CommerceError::UnknownSort(other.to_string())),
        }
    }
}

/// A category filter plus sort order over a parts list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PartQuery {
    /// Only parts in this category; `None` means all.
    pub category: Option<String>,
    pub sort: PartSort,
}

impl PartQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by category. `"all"` clears the filter.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        let category = category.into();
        self.category = if category.eq_ignore_ascii_case("all") {
            None
        } else {
            Some(category)
        };
        self
    }

    pub fn with_sort(mut self, sort: PartSort) -> Self {
        self.sort = sort;
        self
    }

    /// Apply to `parts`. The sort is stable, so ties keep catalog order.
    pub fn apply<'a>(&self, parts: &'a [CompatiblePart]) -> Vec<&'a CompatiblePart> {
        let mut selected: Vec<&CompatiblePart> = parts
            .iter()
            .filter(|p| match &self.category {
                Some(category) => &p.category == category,
                None => true,
            })
            .collect();
        selected.sort_by(|a, b| self.sort.compare(a, b));
        selected
    }
}

/// Distinct categories in first-seen order.
pub fn categories(parts: &[CompatiblePart]) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for part in parts {
        if !seen.contains(&part.category.as_str()) {
            seen.push(&part.category);
        }
    }
    seen
}
