//! Storage-facing service traits

use crate::core::facets::FacetColumn;
use crate::core::predicate::PredicateSet;
use crate::core::query::PageWindow;
use crate::core::sort::SortOrder;
use crate::core::summary::SummaryStats;
use crate::core::transaction::Transaction;
use anyhow::Result;
use async_trait::async_trait;

/// Read-only access to the transaction store
///
/// Implementations translate a [`PredicateSet`] into whatever their backend
/// needs. They must agree on semantics: for the same data and predicates,
/// every backend returns the same count, rows, totals and distinct values.
/// The read operations are agnostic to the underlying storage mechanism.
#[async_trait]
pub trait TransactionRepository: Send + Sync {
    /// Short backend name used in logs and error reports
    fn backend_name(&self) -> &'static str;

    /// Number of transactions matching the predicates
    async fn count(&self, predicates: &PredicateSet) -> Result<u64>;

    /// Matching transactions in `order`, restricted to `window`
    async fn fetch(
        &self,
        predicates: &PredicateSet,
        order: SortOrder,
        window: PageWindow,
    ) -> Result<Vec<Transaction>>;

    /// Totals over the matching transactions; all zero when none match
    async fn aggregate(&self, predicates: &PredicateSet) -> Result<SummaryStats>;

    /// Distinct stored values of a column across the whole dataset
    ///
    /// For [`FacetColumn::Tags`] the raw comma-joined strings are returned.
    async fn distinct_values(&self, column: FacetColumn) -> Result<Vec<String>>;
}

/// Write access used only by the one-time seeding collaborator
#[async_trait]
pub trait TransactionImporter: Send + Sync {
    /// Total number of stored transactions
    async fn record_count(&self) -> Result<u64>;

    /// Store a batch of transactions
    async fn import(&self, batch: &[Transaction]) -> Result<()>;
}
