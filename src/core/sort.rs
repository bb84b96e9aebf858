//! Allow-listed result ordering

use super::transaction::Transaction;
use std::cmp::Ordering;
use std::fmt;

/// Fields a caller may sort by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Date,
    Quantity,
    CustomerName,
}

impl SortKey {
    /// Resolve a requested field name against the allow-list
    pub fn parse(field: &str) -> Option<Self> {
        match field {
            "date" => Some(SortKey::Date),
            "quantity" => Some(SortKey::Quantity),
            "customer_name" | "customerName" => Some(SortKey::CustomerName),
            _ => None,
        }
    }

    /// Storage column for this key
    pub fn column(self) -> &'static str {
        match self {
            SortKey::Date => "date",
            SortKey::Quantity => "sales_quantity",
            SortKey::CustomerName => "customer_name",
        }
    }

    fn compare(self, a: &Transaction, b: &Transaction) -> Ordering {
        match self {
            SortKey::Date => a.date.cmp(&b.date),
            SortKey::Quantity => a.sales.quantity.cmp(&b.sales.quantity),
            SortKey::CustomerName => a.customer.name.cmp(&b.customer.name),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// `"desc"` (any case) is descending; anything else is ascending
    pub fn parse(direction: Option<&str>) -> Self {
        match direction {
            Some(d) if d.trim().eq_ignore_ascii_case("desc") => SortDirection::Desc,
            _ => SortDirection::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Resolved ordering for a list request
///
/// Rows with equal sort keys are ordered by transaction id ascending, so
/// pages never overlap or skip rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub direction: SortDirection,
}

impl Default for SortOrder {
    /// Newest first
    fn default() -> Self {
        Self {
            key: SortKey::Date,
            direction: SortDirection::Desc,
        }
    }
}

impl SortOrder {
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Map a requested field and direction onto an ordering
    ///
    /// - no field, or a field outside the allow-list: date descending,
    ///   whatever direction was supplied
    /// - an allowed field: descending only for `"desc"`, ascending otherwise
    pub fn resolve(field: Option<&str>, direction: Option<&str>) -> Self {
        match field.map(str::trim).and_then(SortKey::parse) {
            Some(key) => Self::new(key, SortDirection::parse(direction)),
            None => Self::default(),
        }
    }

    /// Total order over records, including the transaction id tie-break
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let primary = match self.direction {
            SortDirection::Asc => self.key.compare(a, b),
            SortDirection::Desc => self.key.compare(b, a),
        };
        primary.then_with(|| a.transaction_id.cmp(&b.transaction_id))
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.key.column(), self.direction.as_sql())
    }
}
