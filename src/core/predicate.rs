//! Typed predicate descriptors
//!
//! A [`PredicateSet`] is the single definition of "what matches" shared by the
//! list, summary and facet operations. It is built once from a
//! [`FilterSpecification`] and then either evaluated directly against
//! records (in-memory storage) or compiled into a query (SQL storage, see
//! [`crate::storage::sql`]).
//!
//! A record matches iff every predicate in the set holds. An empty set
//! matches everything.

use super::filter::FilterSpecification;
use super::transaction::Transaction;

/// Transaction attribute a predicate constrains
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Customer name or phone
    Search,
    Region,
    Gender,
    Category,
    Age,
    Tags,
    PaymentMethod,
    Date,
}

impl Dimension {
    /// Storage columns backing this dimension
    pub fn columns(self) -> &'static [&'static str] {
        match self {
            Dimension::Search => &["customer_name", "customer_phone"],
            Dimension::Region => &["customer_region"],
            Dimension::Gender => &["customer_gender"],
            Dimension::Category => &["product_category"],
            Dimension::Age => &["customer_age"],
            Dimension::Tags => &["product_tags"],
            Dimension::PaymentMethod => &["logistics_payment_method"],
            Dimension::Date => &["date"],
        }
    }

    /// Text values of this dimension on a record (numeric dimensions have none)
    fn text_values(self, tx: &Transaction) -> Vec<&str> {
        match self {
            Dimension::Search => vec![tx.customer.name.as_str(), tx.customer.phone.as_str()],
            Dimension::Region => vec![tx.customer.region.as_str()],
            Dimension::Gender => vec![tx.customer.gender.as_str()],
            Dimension::Category => vec![tx.product.category.as_str()],
            Dimension::Tags => vec![tx.product.tags.as_str()],
            Dimension::PaymentMethod => vec![tx.logistics.payment_method.as_str()],
            Dimension::Date => vec![tx.date.as_str()],
            Dimension::Age => Vec::new(),
        }
    }

    fn numeric_value(self, tx: &Transaction) -> Option<u32> {
        match self {
            Dimension::Age => Some(tx.customer.age),
            _ => None,
        }
    }
}

/// Comparison applied to a dimension, carrying its operand
#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    /// Case-insensitive substring match on any of the dimension's columns
    ContainsIgnoreCase(String),
    /// Case-sensitive substring match
    Contains(String),
    /// Exact match
    Equals(String),
    /// Membership in a non-empty set
    OneOf(Vec<String>),
    /// Inclusive lower bound
    AtLeast(u32),
    /// Inclusive upper bound
    AtMost(u32),
    /// Inclusive string range
    Between(String, String),
}

/// A single match condition over one dimension
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub dimension: Dimension,
    pub operator: Operator,
}

impl Predicate {
    pub fn new(dimension: Dimension, operator: Operator) -> Self {
        Self {
            dimension,
            operator,
        }
    }

    /// Evaluate against a record
    pub fn matches(&self, tx: &Transaction) -> bool {
        match &self.operator {
            Operator::ContainsIgnoreCase(needle) => {
                let needle = needle.to_lowercase();
                self.dimension
                    .text_values(tx)
                    .iter()
                    .any(|v| v.to_lowercase().contains(&needle))
            }
            Operator::Contains(needle) => self
                .dimension
                .text_values(tx)
                .iter()
                .any(|v| v.contains(needle.as_str())),
            Operator::Equals(expected) => self
                .dimension
                .text_values(tx)
                .iter()
                .any(|v| *v == expected.as_str()),
            Operator::OneOf(values) => self
                .dimension
                .text_values(tx)
                .iter()
                .any(|v| values.iter().any(|candidate| candidate.as_str() == *v)),
            Operator::AtLeast(bound) => self
                .dimension
                .numeric_value(tx)
                .is_some_and(|v| v >= *bound),
            Operator::AtMost(bound) => self
                .dimension
                .numeric_value(tx)
                .is_some_and(|v| v <= *bound),
            Operator::Between(start, end) => self
                .dimension
                .text_values(tx)
                .iter()
                .any(|v| *v >= start.as_str() && *v <= end.as_str()),
        }
    }
}

/// Ordered conjunction of predicates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PredicateSet {
    predicates: Vec<Predicate>,
}

impl PredicateSet {
    /// Set with no predicates; matches every record
    pub fn match_all() -> Self {
        Self::default()
    }

    /// Build the predicates implied by a filter specification
    ///
    /// Only non-empty conditions produce a predicate, and a whitespace-only
    /// search counts as empty. Sort and page fields are ignored. Each
    /// supplied tag becomes its own predicate, so multiple tags are AND-ed.
    /// The date range is only applied when both ends are present.
    pub fn from_spec(spec: &FilterSpecification) -> Self {
        let mut predicates = Vec::new();

        if let Some(search) = spec.search.as_deref().filter(|s| !s.trim().is_empty()) {
            predicates.push(Predicate::new(
                Dimension::Search,
                Operator::ContainsIgnoreCase(search.to_string()),
            ));
        }

        if !spec.regions.is_empty() {
            predicates.push(Predicate::new(
                Dimension::Region,
                Operator::OneOf(spec.regions.clone()),
            ));
        }

        if let Some(gender) = spec.gender.as_deref().filter(|g| !g.is_empty()) {
            predicates.push(Predicate::new(
                Dimension::Gender,
                Operator::Equals(gender.to_string()),
            ));
        }

        if !spec.categories.is_empty() {
            predicates.push(Predicate::new(
                Dimension::Category,
                Operator::OneOf(spec.categories.clone()),
            ));
        }

        if let Some(min_age) = spec.min_age.filter(|age| *age > 0) {
            predicates.push(Predicate::new(Dimension::Age, Operator::AtLeast(min_age)));
        }
        if let Some(max_age) = spec.max_age.filter(|age| *age > 0) {
            predicates.push(Predicate::new(Dimension::Age, Operator::AtMost(max_age)));
        }

        for tag in spec.tags.iter().filter(|t| !t.is_empty()) {
            predicates.push(Predicate::new(
                Dimension::Tags,
                Operator::Contains(tag.clone()),
            ));
        }

        if !spec.payment_methods.is_empty() {
            predicates.push(Predicate::new(
                Dimension::PaymentMethod,
                Operator::OneOf(spec.payment_methods.clone()),
            ));
        }

        if let Some((start, end)) = spec.date_range() {
            predicates.push(Predicate::new(
                Dimension::Date,
                Operator::Between(start.to_string(), end.to_string()),
            ));
        }

        Self { predicates }
    }

    /// True when every predicate holds for the record
    pub fn matches(&self, tx: &Transaction) -> bool {
        self.predicates.iter().all(|p| p.matches(tx))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Predicate> {
        self.predicates.iter()
    }

    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl From<&FilterSpecification> for PredicateSet {
    fn from(spec: &FilterSpecification) -> Self {
        Self::from_spec(spec)
    }
}
