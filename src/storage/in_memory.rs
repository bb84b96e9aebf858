//! In-memory implementation of TransactionRepository for testing and development

use crate::core::{
    FacetColumn, PageWindow, PredicateSet, SortOrder, SummaryStats, Transaction,
    TransactionImporter, TransactionRepository,
};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory transaction store
///
/// Evaluates predicates directly against the stored records. Useful for
/// testing and development. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryTransactionRepository {
    transactions: Arc<RwLock<Vec<Transaction>>>,
}

impl InMemoryTransactionRepository {
    /// Create an empty store
    pub fn new() -> Self {
        Self::with_transactions(Vec::new())
    }

    /// Create a store holding `transactions`
    pub fn with_transactions(transactions: Vec<Transaction>) -> Self {
        Self {
            transactions: Arc::new(RwLock::new(transactions)),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Vec<Transaction>>> {
        self.transactions
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))
    }
}

impl Default for InMemoryTransactionRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactionRepository {
    fn backend_name(&self) -> &'static str {
        "in_memory"
    }

    async fn count(&self, predicates: &PredicateSet) -> Result<u64> {
        let transactions = self.read()?;
        Ok(transactions.iter().filter(|tx| predicates.matches(tx)).count() as u64)
    }

    async fn fetch(
        &self,
        predicates: &PredicateSet,
        order: SortOrder,
        window: PageWindow,
    ) -> Result<Vec<Transaction>> {
        let transactions = self.read()?;

        let mut matching: Vec<&Transaction> = transactions
            .iter()
            .filter(|tx| predicates.matches(tx))
            .collect();
        matching.sort_by(|a, b| order.compare(a, b));

        Ok(window
            .slice(matching)
            .into_iter()
            .cloned()
            .collect())
    }

    async fn aggregate(&self, predicates: &PredicateSet) -> Result<SummaryStats> {
        let transactions = self.read()?;
        Ok(SummaryStats::from_transactions(
            transactions.iter().filter(|tx| predicates.matches(tx)),
        ))
    }

    async fn distinct_values(&self, column: FacetColumn) -> Result<Vec<String>> {
        let transactions = self.read()?;

        let mut values: Vec<String> = transactions
            .iter()
            .map(|tx| facet_value(tx, column).to_string())
            .collect();
        values.sort();
        values.dedup();

        Ok(values)
    }
}

#[async_trait]
impl TransactionImporter for InMemoryTransactionRepository {
    async fn record_count(&self) -> Result<u64> {
        Ok(self.read()?.len() as u64)
    }

    async fn import(&self, batch: &[Transaction]) -> Result<()> {
        let mut transactions = self
            .transactions
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        transactions.extend_from_slice(batch);

        Ok(())
    }
}

fn facet_value(tx: &Transaction, column: FacetColumn) -> &str {
    match column {
        FacetColumn::Gender => &tx.customer.gender,
        FacetColumn::Region => &tx.customer.region,
        FacetColumn::Category => &tx.product.category,
        FacetColumn::PaymentMethod => &tx.logistics.payment_method,
        FacetColumn::Tags => &tx.product.tags,
    }
}
