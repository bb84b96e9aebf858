//! Lenient request parameter parsing
//!
//! Query strings arrive as loosely-typed `(key, value)` pairs. [`FilterParams`]
//! collects them (set-valued keys may repeat) and [`FilterParams::normalize`]
//! turns them into a [`FilterSpecification`].
//!
//! Normalization never errors, it only defaults:
//! - a non-numeric `page`, `pageSize`, `minAge` or `maxAge` is discarded
//! - empty or whitespace-only values are dropped; any other text is kept
//!   exactly as sent
//! - an age of `0` (or less) means "unbounded"
//!
//! # Example
//!
//! ```
//! use sales_query::core::params::FilterParams;
//!
//! let params = FilterParams::from_pairs([
//!     ("region", "North"),
//!     ("region", "South"),
//!     ("page", "abc"),
//!     ("minAge", "25"),
//! ]);
//! let spec = params.normalize();
//!
//! assert_eq!(spec.regions, vec!["North", "South"]);
//! assert_eq!(spec.page, 1);
//! assert_eq!(spec.min_age, Some(25));
//! ```

use super::filter::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE, FilterSpecification};

/// Raw, unvalidated request parameters
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterParams {
    pub search: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
    pub sort_field: Option<String>,
    pub sort_direction: Option<String>,
    pub region: Vec<String>,
    pub gender: Vec<String>,
    pub category: Vec<String>,
    pub tag: Vec<String>,
    pub payment_method: Vec<String>,
    pub min_age: Option<String>,
    pub max_age: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// Parameter a query-string key maps onto
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamKey {
    Search,
    Page,
    PageSize,
    SortField,
    SortDirection,
    Region,
    Gender,
    Category,
    Tag,
    PaymentMethod,
    MinAge,
    MaxAge,
    StartDate,
    EndDate,
}

impl ParamKey {
    /// Resolve a query-string key, including the snake_case and dashboard aliases
    fn parse(key: &str) -> Option<Self> {
        let key = key.strip_suffix("[]").unwrap_or(key);
        Some(match key {
            "search" => Self::Search,
            "page" => Self::Page,
            "pageSize" | "page_size" | "limit" => Self::PageSize,
            "sortField" | "sort_field" | "sort_by" => Self::SortField,
            "sortDirection" | "sort_direction" | "sort_order" => Self::SortDirection,
            "region" | "customerRegion" | "customer_region" => Self::Region,
            "gender" => Self::Gender,
            "category" | "productCategory" | "product_category" => Self::Category,
            "tag" | "tags" => Self::Tag,
            "paymentMethod" | "payment_method" => Self::PaymentMethod,
            "minAge" | "min_age" | "ageMin" => Self::MinAge,
            "maxAge" | "max_age" | "ageMax" => Self::MaxAge,
            "startDate" | "start_date" | "dateStart" => Self::StartDate,
            "endDate" | "end_date" | "dateEnd" => Self::EndDate,
            _ => return None,
        })
    }
}

impl FilterParams {
    /// Collect parameters from query-string pairs
    ///
    /// Unknown keys are ignored. For single-valued keys the first occurrence
    /// wins; set-valued keys accumulate every occurrence in order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut params = Self::default();
        for (key, value) in pairs {
            if let Some(key) = ParamKey::parse(key.as_ref()) {
                params.push(key, value.into());
            }
        }
        params
    }

    fn push(&mut self, key: ParamKey, value: String) {
        let first = |slot: &mut Option<String>, value: String| {
            if slot.is_none() {
                *slot = Some(value);
            }
        };

        match key {
            ParamKey::Search => first(&mut self.search, value),
            ParamKey::Page => first(&mut self.page, value),
            ParamKey::PageSize => first(&mut self.page_size, value),
            ParamKey::SortField => first(&mut self.sort_field, value),
            ParamKey::SortDirection => first(&mut self.sort_direction, value),
            ParamKey::Region => self.region.push(value),
            ParamKey::Gender => self.gender.push(value),
            ParamKey::Category => self.category.push(value),
            ParamKey::Tag => self.tag.push(value),
            ParamKey::PaymentMethod => self.payment_method.push(value),
            ParamKey::MinAge => first(&mut self.min_age, value),
            ParamKey::MaxAge => first(&mut self.max_age, value),
            ParamKey::StartDate => first(&mut self.start_date, value),
            ParamKey::EndDate => first(&mut self.end_date, value),
        }
    }

    /// Normalize into a [`FilterSpecification`]. Never fails.
    pub fn normalize(&self) -> FilterSpecification {
        FilterSpecification {
            search: non_blank(self.search.as_deref()),
            regions: non_blank_set(&self.region),
            gender: self.gender.iter().find_map(|g| non_blank(Some(g))),
            categories: non_blank_set(&self.category),
            tags: non_blank_set(&self.tag),
            payment_methods: non_blank_set(&self.payment_method),
            min_age: parse_age(self.min_age.as_deref()),
            max_age: parse_age(self.max_age.as_deref()),
            start_date: non_blank(self.start_date.as_deref()),
            end_date: non_blank(self.end_date.as_deref()),
            sort_field: non_blank(self.sort_field.as_deref()),
            sort_direction: non_blank(self.sort_direction.as_deref()),
            page: parse_int(self.page.as_deref()).unwrap_or(DEFAULT_PAGE),
            page_size: parse_int(self.page_size.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(String::from)
}

fn non_blank_set(values: &[String]) -> Vec<String> {
    values.iter().filter_map(|v| non_blank(Some(v))).collect()
}

fn parse_int(value: Option<&str>) -> Option<i64> {
    value.and_then(|v| v.trim().parse::<i64>().ok())
}

/// `0`, negatives and garbage all mean "no bound"
fn parse_age(value: Option<&str>) -> Option<u32> {
    parse_int(value)
        .filter(|age| *age > 0)
        .map(|age| u32::try_from(age).unwrap_or(u32::MAX))
}
