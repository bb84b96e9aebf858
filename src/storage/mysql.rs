//! MySQL storage backend using sqlx.
//!
//! Provides `MysqlTransactionRepository`, backed by a MySQL database via
//! `sqlx::MySqlPool`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mysql` feature flag:
//! ```toml
//! [dependencies]
//! sales-query = { version = "0.1", features = ["mysql"] }
//! ```
//!
//! # Schema
//!
//! Transactions live in a single `transactions` table whose columns are the
//! record attributes prefixed by their group (`customer_`, `product_`,
//! `sales_`, `logistics_`). Text columns use a case-sensitive collation so
//! that set membership, tag containment and date ranges compare exactly like
//! the in-memory store; only the search predicate lowercases both sides.
//!
//! Statements are compiled by [`crate::storage::sql`]; every user value is
//! bound, never interpolated.

use super::sql::{self, COLUMNS, SqlFilter, SqlValue, TABLE};
use crate::core::{
    Customer, FacetColumn, Logistics, PageWindow, PredicateSet, Product, SalesInfo, SortOrder,
    StorageError, SummaryStats, Transaction, TransactionImporter, TransactionRepository,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use sqlx::mysql::{MySqlArguments, MySqlPoolOptions, MySqlRow};
use sqlx::query::Query;
use sqlx::{MySql, MySqlPool, QueryBuilder, Row};

/// Rows per `INSERT` statement during import
const INSERT_CHUNK: usize = 100;

const BACKEND: &str = "mysql";

// ---------------------------------------------------------------------------
// Schema management
// ---------------------------------------------------------------------------

/// Apply the required table and indexes (idempotent).
///
/// Safe to call on every startup.
pub async fn ensure_schema(pool: &MySqlPool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS transactions (
            id BIGINT UNSIGNED NOT NULL AUTO_INCREMENT PRIMARY KEY,
            transaction_id VARCHAR(64) NOT NULL,
            date VARCHAR(32) NOT NULL,
            customer_id VARCHAR(64) NOT NULL DEFAULT '',
            customer_name VARCHAR(255) NOT NULL DEFAULT '',
            customer_phone VARCHAR(64) NOT NULL DEFAULT '',
            customer_gender VARCHAR(32) NOT NULL DEFAULT '',
            customer_age INT UNSIGNED NOT NULL DEFAULT 0,
            customer_region VARCHAR(128) NOT NULL DEFAULT '',
            customer_type VARCHAR(64) NOT NULL DEFAULT '',
            product_id VARCHAR(64) NOT NULL DEFAULT '',
            product_name VARCHAR(255) NOT NULL DEFAULT '',
            product_brand VARCHAR(128) NOT NULL DEFAULT '',
            product_category VARCHAR(128) NOT NULL DEFAULT '',
            product_tags VARCHAR(512) NOT NULL DEFAULT '',
            sales_quantity INT UNSIGNED NOT NULL DEFAULT 0,
            sales_price_per_unit DOUBLE NOT NULL DEFAULT 0,
            sales_discount_percentage DOUBLE NOT NULL DEFAULT 0,
            sales_total_amount DOUBLE NOT NULL DEFAULT 0,
            sales_final_amount DOUBLE NOT NULL DEFAULT 0,
            logistics_payment_method VARCHAR(64) NOT NULL DEFAULT '',
            logistics_order_status VARCHAR(64) NOT NULL DEFAULT '',
            logistics_delivery_type VARCHAR(64) NOT NULL DEFAULT '',
            logistics_store_id VARCHAR(64) NOT NULL DEFAULT '',
            logistics_store_location VARCHAR(128) NOT NULL DEFAULT '',
            logistics_salesperson_id VARCHAR(64) NOT NULL DEFAULT '',
            logistics_employee_name VARCHAR(255) NOT NULL DEFAULT '',
            INDEX idx_transaction_id (transaction_id),
            INDEX idx_date (date),
            INDEX idx_customer_name (customer_name),
            INDEX idx_customer_region (customer_region),
            INDEX idx_product_category (product_category),
            INDEX idx_payment_method (logistics_payment_method)
        ) CHARACTER SET utf8mb4 COLLATE utf8mb4_0900_as_cs",
    )
    .execute(pool)
    .await
    .map_err(|e| anyhow!("Failed to create transactions table: {}", e))?;

    Ok(())
}

// ---------------------------------------------------------------------------
// MysqlTransactionRepository
// ---------------------------------------------------------------------------

/// Transaction store backed by MySQL.
///
/// # Example
///
/// ```rust,ignore
/// use sales_query::storage::MysqlTransactionRepository;
///
/// let repo = MysqlTransactionRepository::connect("mysql://root@localhost/sales").await?;
/// let total = repo.count(&PredicateSet::match_all()).await?;
/// ```
#[derive(Clone, Debug)]
pub struct MysqlTransactionRepository {
    pool: MySqlPool,
}

impl MysqlTransactionRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Open a pool and make sure the schema exists
    pub async fn connect(dsn: &str) -> Result<Self> {
        let pool = MySqlPoolOptions::new()
            .max_connections(10)
            .connect(dsn)
            .await
            .map_err(|e| StorageError::ConnectionError {
                backend: BACKEND.to_string(),
                message: e.to_string(),
            })?;

        ensure_schema(&pool).await?;
        tracing::info!("connected to MySQL, schema ready");

        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &MySqlPool {
        &self.pool
    }
}

fn bind_filter<'q>(
    mut query: Query<'q, MySql, MySqlArguments>,
    binds: &'q [SqlValue],
) -> Query<'q, MySql, MySqlArguments> {
    for value in binds {
        query = match value {
            SqlValue::Text(text) => query.bind(text.as_str()),
            SqlValue::UInt(n) => query.bind(*n),
        };
    }
    query
}

/// Driver failure while running a statement; an exhausted or closed pool
/// means the backend is unavailable
fn query_error(context: &str, err: sqlx::Error) -> anyhow::Error {
    match err {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => StorageError::Unavailable {
            backend: BACKEND.to_string(),
        }
        .into(),
        other => anyhow!("{}: {}", context, other),
    }
}

/// A stored value that does not fit the record
fn decode_error(column: &str, err: impl std::fmt::Display) -> anyhow::Error {
    StorageError::IntegrityError {
        message: format!("column {}: {}", column, err),
    }
    .into()
}

fn decode_count(column: &str, count: i64) -> Result<u64> {
    u64::try_from(count).map_err(|e| decode_error(column, e))
}

fn row_to_transaction(row: &MySqlRow) -> Result<Transaction> {
    let text = |column: &str| -> Result<String> {
        row.try_get::<String, _>(column)
            .map_err(|e| decode_error(column, e))
    };
    let number = |column: &str| -> Result<f64> {
        row.try_get::<f64, _>(column)
            .map_err(|e| decode_error(column, e))
    };
    let unsigned = |column: &str| -> Result<u32> {
        row.try_get::<u32, _>(column)
            .map_err(|e| decode_error(column, e))
    };

    Ok(Transaction {
        transaction_id: text("transaction_id")?,
        date: text("date")?,
        customer: Customer {
            id: text("customer_id")?,
            name: text("customer_name")?,
            phone: text("customer_phone")?,
            gender: text("customer_gender")?,
            age: unsigned("customer_age")?,
            region: text("customer_region")?,
            customer_type: text("customer_type")?,
        },
        product: Product {
            id: text("product_id")?,
            name: text("product_name")?,
            brand: text("product_brand")?,
            category: text("product_category")?,
            tags: text("product_tags")?,
        },
        sales: SalesInfo {
            quantity: unsigned("sales_quantity")?,
            price: number("sales_price_per_unit")?,
            discount: number("sales_discount_percentage")?,
            total: number("sales_total_amount")?,
            final_amount: number("sales_final_amount")?,
        },
        logistics: Logistics {
            payment_method: text("logistics_payment_method")?,
            order_status: text("logistics_order_status")?,
            delivery_type: text("logistics_delivery_type")?,
            store_id: text("logistics_store_id")?,
            store_location: text("logistics_store_location")?,
            salesperson_id: text("logistics_salesperson_id")?,
            employee_name: text("logistics_employee_name")?,
        },
    })
}

#[async_trait]
impl TransactionRepository for MysqlTransactionRepository {
    fn backend_name(&self) -> &'static str {
        BACKEND
    }

    async fn count(&self, predicates: &PredicateSet) -> Result<u64> {
        let filter = SqlFilter::compile(predicates);
        let statement = sql::count_sql(&filter);

        let row = bind_filter(sqlx::query(&statement), &filter.binds)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to count transactions", e))?;

        let total: i64 = row.try_get(0).map_err(|e| decode_error("COUNT(*)", e))?;
        decode_count("COUNT(*)", total)
    }

    async fn fetch(
        &self,
        predicates: &PredicateSet,
        order: SortOrder,
        window: PageWindow,
    ) -> Result<Vec<Transaction>> {
        let filter = SqlFilter::compile(predicates);
        let statement = sql::select_sql(&filter, order);

        let rows = bind_filter(sqlx::query(&statement), &filter.binds)
            .bind(window.limit())
            .bind(window.offset())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to fetch transactions", e))?;

        rows.iter().map(row_to_transaction).collect()
    }

    async fn aggregate(&self, predicates: &PredicateSet) -> Result<SummaryStats> {
        let filter = SqlFilter::compile(predicates);
        let statement = sql::aggregate_sql(&filter);

        let row = bind_filter(sqlx::query(&statement), &filter.binds)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| query_error("Failed to aggregate transactions", e))?;

        let total_transactions: i64 = row.try_get(3).map_err(|e| decode_error("COUNT(*)", e))?;

        Ok(SummaryStats {
            total_units_sold: row
                .try_get(0)
                .map_err(|e| decode_error("SUM(sales_quantity)", e))?,
            total_amount: row
                .try_get(1)
                .map_err(|e| decode_error("SUM(sales_total_amount)", e))?,
            total_discount: row
                .try_get(2)
                .map_err(|e| decode_error("discount total", e))?,
            total_transactions: decode_count("COUNT(*)", total_transactions)?,
        })
    }

    async fn distinct_values(&self, column: FacetColumn) -> Result<Vec<String>> {
        let statement = sql::distinct_sql(column);

        let rows = sqlx::query(&statement)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| query_error("Failed to list distinct values", e))?;

        rows.iter()
            .map(|row| {
                row.try_get::<String, _>(0)
                    .map_err(|e| decode_error(column.column(), e))
            })
            .collect()
    }
}

#[async_trait]
impl TransactionImporter for MysqlTransactionRepository {
    async fn record_count(&self) -> Result<u64> {
        self.count(&PredicateSet::match_all()).await
    }

    async fn import(&self, batch: &[Transaction]) -> Result<()> {
        for chunk in batch.chunks(INSERT_CHUNK) {
            let mut builder: QueryBuilder<'_, MySql> =
                QueryBuilder::new(format!("INSERT INTO {} ({}) ", TABLE, COLUMNS.join(", ")));

            builder.push_values(chunk, |mut b, tx| {
                b.push_bind(tx.transaction_id.as_str())
                    .push_bind(tx.date.as_str())
                    .push_bind(tx.customer.id.as_str())
                    .push_bind(tx.customer.name.as_str())
                    .push_bind(tx.customer.phone.as_str())
                    .push_bind(tx.customer.gender.as_str())
                    .push_bind(tx.customer.age)
                    .push_bind(tx.customer.region.as_str())
                    .push_bind(tx.customer.customer_type.as_str())
                    .push_bind(tx.product.id.as_str())
                    .push_bind(tx.product.name.as_str())
                    .push_bind(tx.product.brand.as_str())
                    .push_bind(tx.product.category.as_str())
                    .push_bind(tx.product.tags.as_str())
                    .push_bind(tx.sales.quantity)
                    .push_bind(tx.sales.price)
                    .push_bind(tx.sales.discount)
                    .push_bind(tx.sales.total)
                    .push_bind(tx.sales.final_amount)
                    .push_bind(tx.logistics.payment_method.as_str())
                    .push_bind(tx.logistics.order_status.as_str())
                    .push_bind(tx.logistics.delivery_type.as_str())
                    .push_bind(tx.logistics.store_id.as_str())
                    .push_bind(tx.logistics.store_location.as_str())
                    .push_bind(tx.logistics.salesperson_id.as_str())
                    .push_bind(tx.logistics.employee_name.as_str());
            });

            builder
                .build()
                .execute(&self.pool)
                .await
                .map_err(|e| query_error("Failed to insert transactions", e))?;
        }

        Ok(())
    }
}
