//! In-memory filter and sort for catalog pages that fetch once.
//!
//! The public training/jobs/internships/products pages load the whole
//! active collection up front and re-run these whenever a filter input
//! changes. Both functions are pure: the source slice is never mutated.

use std::cmp::Ordering;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Accessors the catalog filter/sort needs from a record. Fields a record
/// does not have stay `None` and the matching predicates/comparators treat
/// them as absent.
pub trait CatalogRecord {
    /// Text fields the free-text search runs over.
    fn search_fields(&self) -> Vec<&str>;

    fn created_at(&self) -> NaiveDateTime;

    fn category(&self) -> Option<&str> {
        None
    }

    fn location_type(&self) -> Option<&str> {
        None
    }

    fn level(&self) -> Option<&str> {
        None
    }

    fn kind(&self) -> Option<&str> {
        None
    }

    fn company(&self) -> Option<&str> {
        None
    }

    fn featured(&self) -> bool {
        false
    }

    fn urgent(&self) -> bool {
        false
    }

    fn price(&self) -> Option<f64> {
        None
    }

    fn rating(&self) -> Option<f64> {
        None
    }

    fn deadline(&self) -> Option<NaiveDate> {
        None
    }
}

/// Active predicates combined with logical AND. Unset entries do not
/// constrain the result.
#[derive(Clone, Debug, Default)]
pub struct FilterSet {
    pub search: String,
    pub category: Option<String>,
    pub location_type: Option<String>,
    pub level: Option<String>,
    pub kind: Option<String>,
}

impl FilterSet {
    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn category(mut self, value: impl Into<String>) -> Self {
        self.category = non_empty(value.into());
        self
    }

    pub fn location_type(mut self, value: impl Into<String>) -> Self {
        self.location_type = non_empty(value.into());
        self
    }

    pub fn level(mut self, value: impl Into<String>) -> Self {
        self.level = non_empty(value.into());
        self
    }

    pub fn kind(mut self, value: impl Into<String>) -> Self {
        self.kind = non_empty(value.into());
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() { None } else { Some(value) }
}

/// Sort keys offered across the catalog pages.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    Featured,
    PriceLow,
    PriceHigh,
    Rating,
    Deadline,
    Company,
    Latest,
}

impl SortKey {
    pub fn as_str(self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Rating => "rating",
            SortKey::Deadline => "deadline",
            SortKey::Company => "company",
            SortKey::Latest => "latest",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "featured" => Some(SortKey::Featured),
            "price-low" => Some(SortKey::PriceLow),
            "price-high" => Some(SortKey::PriceHigh),
            "rating" => Some(SortKey::Rating),
            "deadline" => Some(SortKey::Deadline),
            "company" => Some(SortKey::Company),
            "latest" => Some(SortKey::Latest),
            _ => None,
        }
    }
}

/// Returns the subsequence matching every active predicate.
pub fn filter<T: CatalogRecord + Clone>(records: &[T], filters: &FilterSet) -> Vec<T> {
    let needle = filters.search.trim().to_lowercase();
    records
        .iter()
        .filter(|record| {
            if !needle.is_empty()
                && !record
                    .search_fields()
                    .iter()
                    .any(|field| field.to_lowercase().contains(&needle))
            {
                return false;
            }
            matches_exact(record.category(), filters.category.as_deref())
                && matches_exact(record.location_type(), filters.location_type.as_deref())
                && matches_exact(record.level(), filters.level.as_deref())
                && matches_exact(record.kind(), filters.kind.as_deref())
        })
        .cloned()
        .collect()
}

fn matches_exact(actual: Option<&str>, wanted: Option<&str>) -> bool {
    match wanted {
        None => true,
        Some(wanted) => actual == Some(wanted),
    }
}

/// Stable sort into a new vector.
pub fn sort<T: CatalogRecord + Clone>(records: &[T], key: SortKey) -> Vec<T> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key));
    sorted
}

fn compare<T: CatalogRecord>(a: &T, b: &T, key: SortKey) -> Ordering {
    match key {
        SortKey::Featured => b
            .featured()
            .cmp(&a.featured())
            .then(b.urgent().cmp(&a.urgent()))
            .then(b.created_at().cmp(&a.created_at())),
        SortKey::PriceLow => cmp_option_f64(a.price(), b.price()),
        SortKey::PriceHigh => cmp_option_f64(b.price(), a.price()),
        SortKey::Rating => cmp_option_f64(b.rating(), a.rating()),
        SortKey::Deadline => match (a.deadline(), b.deadline()) {
            (Some(a), Some(b)) => a.cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Company => match (a.company(), b.company()) {
            (Some(a), Some(b)) => a.to_lowercase().cmp(&b.to_lowercase()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        },
        SortKey::Latest => b.created_at().cmp(&a.created_at()),
    }
}

fn cmp_option_f64(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
