//! Backend-neutral SQL compilation of predicate sets
//!
//! Statements use `?` placeholders; the values to bind are returned next to
//! the SQL text in bind order. Only allow-listed column names ever reach the
//! statement text, user values are always bound.

use crate::core::{FacetColumn, Operator, PredicateSet, SortKey, SortOrder};

/// Table holding the transactions
pub const TABLE: &str = "transactions";

/// Code-point collation for text sort keys, the same order as `str::cmp`
pub const SORT_COLLATION: &str = "utf8mb4_0900_bin";

/// Column list in the order rows are selected and inserted
pub const COLUMNS: [&str; 26] = [
    "transaction_id",
    "date",
    "customer_id",
    "customer_name",
    "customer_phone",
    "customer_gender",
    "customer_age",
    "customer_region",
    "customer_type",
    "product_id",
    "product_name",
    "product_brand",
    "product_category",
    "product_tags",
    "sales_quantity",
    "sales_price_per_unit",
    "sales_discount_percentage",
    "sales_total_amount",
    "sales_final_amount",
    "logistics_payment_method",
    "logistics_order_status",
    "logistics_delivery_type",
    "logistics_store_id",
    "logistics_store_location",
    "logistics_salesperson_id",
    "logistics_employee_name",
];

/// A value bound to a `?` placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Text(String),
    UInt(u32),
}

/// Compiled `WHERE` body plus its bind values
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SqlFilter {
    /// Conjunction of conditions; empty when nothing is filtered
    pub clause: String,
    pub binds: Vec<SqlValue>,
}

impl SqlFilter {
    /// Compile every predicate into one conjunction
    pub fn compile(predicates: &PredicateSet) -> Self {
        let mut conditions = Vec::with_capacity(predicates.len());
        let mut binds = Vec::new();

        for predicate in predicates.iter() {
            let columns = predicate.dimension.columns();
            let condition = match &predicate.operator {
                Operator::ContainsIgnoreCase(needle) => {
                    let pattern = contains_pattern(&needle.to_lowercase());
                    let alternatives: Vec<String> = columns
                        .iter()
                        .map(|column| {
                            binds.push(SqlValue::Text(pattern.clone()));
                            format!("LOWER({}) LIKE ?", column)
                        })
                        .collect();
                    format!("({})", alternatives.join(" OR "))
                }
                Operator::Contains(needle) => {
                    binds.push(SqlValue::Text(contains_pattern(needle)));
                    format!("{} LIKE ?", columns[0])
                }
                Operator::Equals(value) => {
                    binds.push(SqlValue::Text(value.clone()));
                    format!("{} = ?", columns[0])
                }
                Operator::OneOf(values) => {
                    binds.extend(values.iter().cloned().map(SqlValue::Text));
                    format!("{} IN ({})", columns[0], placeholders(values.len()))
                }
                Operator::AtLeast(bound) => {
                    binds.push(SqlValue::UInt(*bound));
                    format!("{} >= ?", columns[0])
                }
                Operator::AtMost(bound) => {
                    binds.push(SqlValue::UInt(*bound));
                    format!("{} <= ?", columns[0])
                }
                Operator::Between(start, end) => {
                    binds.push(SqlValue::Text(start.clone()));
                    binds.push(SqlValue::Text(end.clone()));
                    format!("{} BETWEEN ? AND ?", columns[0])
                }
            };
            conditions.push(condition);
        }

        Self {
            clause: conditions.join(" AND "),
            binds,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.clause.is_empty()
    }

    /// ` WHERE ...`, or nothing for an unfiltered read
    pub fn where_sql(&self) -> String {
        if self.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", self.clause)
        }
    }
}

/// Escape `LIKE` wildcards so user text only matches literally
///
/// Backslash is the default `LIKE` escape character.
pub fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// `%text%` with `text` escaped
pub fn contains_pattern(raw: &str) -> String {
    format!("%{}%", escape_like(raw))
}

fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

fn sort_expr(key: SortKey) -> String {
    match key {
        SortKey::Quantity => key.column().to_string(),
        SortKey::Date | SortKey::CustomerName => {
            format!("{} COLLATE {}", key.column(), SORT_COLLATION)
        }
    }
}

/// `ORDER BY` over the sort key, then transaction id ascending
pub fn order_by_clause(order: SortOrder) -> String {
    format!(
        " ORDER BY {} {}, transaction_id COLLATE {} ASC",
        sort_expr(order.key),
        order.direction.as_sql(),
        SORT_COLLATION
    )
}

/// `SELECT COUNT(*)` over the filtered rows
pub fn count_sql(filter: &SqlFilter) -> String {
    format!("SELECT COUNT(*) FROM {}{}", TABLE, filter.where_sql())
}

/// Ordered page of full rows; bind the filter values, then limit, then offset
pub fn select_sql(filter: &SqlFilter, order: SortOrder) -> String {
    format!(
        "SELECT {} FROM {}{}{} LIMIT ? OFFSET ?",
        COLUMNS.join(", "),
        TABLE,
        filter.where_sql(),
        order_by_clause(order)
    )
}

/// Units, gross amount, discount amount and row count in one pass
pub fn aggregate_sql(filter: &SqlFilter) -> String {
    format!(
        "SELECT \
         CAST(COALESCE(SUM(sales_quantity), 0) AS UNSIGNED), \
         CAST(COALESCE(SUM(sales_total_amount), 0) AS DOUBLE), \
         CAST(COALESCE(SUM(sales_total_amount - sales_final_amount), 0) AS DOUBLE), \
         COUNT(*) \
         FROM {}{}",
        TABLE,
        filter.where_sql()
    )
}

/// Distinct raw values of one facet column over the whole table
pub fn distinct_sql(column: FacetColumn) -> String {
    format!(
        "SELECT DISTINCT {col} FROM {table} ORDER BY {col}",
        col = column.column(),
        table = TABLE
    )
}
