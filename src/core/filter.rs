//! Normalized filter, sort and page request

use serde::{Deserialize, Serialize};

/// Page used when the caller supplies none (or an unusable one)
pub const DEFAULT_PAGE: i64 = 1;

/// Page size used when the caller supplies none (or an unusable one)
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Well-typed representation of a caller's search/filter/sort/page request
///
/// Every field is optional in meaning: an empty string, an empty set or
/// `None` is a no-op filter, never a match-nothing filter. Values are
/// produced by [`FilterParams::normalize`](crate::core::params::FilterParams::normalize),
/// which never fails.
///
/// `page` and `page_size` keep whatever integer the caller sent; the
/// paginator is responsible for mapping non-positive values to defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpecification {
    /// Case-insensitive substring matched against customer name or phone
    pub search: Option<String>,

    pub regions: Vec<String>,

    /// Exact gender match (single value)
    pub gender: Option<String>,

    pub categories: Vec<String>,

    /// Every tag must be contained in the stored tag string
    pub tags: Vec<String>,

    pub payment_methods: Vec<String>,

    /// Inclusive lower age bound; `None` when unbounded
    pub min_age: Option<u32>,

    /// Inclusive upper age bound; `None` when unbounded
    pub max_age: Option<u32>,

    /// Inclusive start date; only applied together with `end_date`
    pub start_date: Option<String>,

    /// Inclusive end date; only applied together with `start_date`
    pub end_date: Option<String>,

    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,

    pub page: i64,
    pub page_size: i64,
}

impl Default for FilterSpecification {
    fn default() -> Self {
        Self {
            search: None,
            regions: Vec::new(),
            gender: None,
            categories: Vec::new(),
            tags: Vec::new(),
            payment_methods: Vec::new(),
            min_age: None,
            max_age: None,
            start_date: None,
            end_date: None,
            sort_field: None,
            sort_direction: None,
            page: DEFAULT_PAGE,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl FilterSpecification {
    /// Specification that matches every transaction
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_regions<I, S>(mut self, regions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.regions = regions.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn with_categories<I, S>(mut self, categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.categories = categories.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_payment_methods<I, S>(mut self, methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.payment_methods = methods.into_iter().map(Into::into).collect();
        self
    }

    /// Set age bounds; `0` means unbounded on that side
    pub fn with_age_range(mut self, min_age: u32, max_age: u32) -> Self {
        self.min_age = (min_age > 0).then_some(min_age);
        self.max_age = (max_age > 0).then_some(max_age);
        self
    }

    pub fn with_start_date(mut self, start: impl Into<String>) -> Self {
        self.start_date = Some(start.into());
        self
    }

    pub fn with_end_date(mut self, end: impl Into<String>) -> Self {
        self.end_date = Some(end.into());
        self
    }

    pub fn with_date_range(self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.with_start_date(start).with_end_date(end)
    }

    /// Both ends of the date range, when both were supplied
    pub fn date_range(&self) -> Option<(&str, &str)> {
        match (self.start_date.as_deref(), self.end_date.as_deref()) {
            (Some(start), Some(end)) if !start.is_empty() && !end.is_empty() => Some((start, end)),
            _ => None,
        }
    }
}
