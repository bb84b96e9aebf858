//! Read operations: list, summary and facets
//!
//! [`SalesReader`] is the only entry point the transport layer talks to. It
//! builds one [`PredicateSet`] per request and hands it to the injected
//! [`TransactionRepository`], so the list and summary operations agree on
//! what matches. Facets ignore any filter.

use super::error::{SalesError, SalesResult};
use super::facets::{FacetColumn, FilterOptions, distinct_sorted, flatten_tags};
use super::filter::FilterSpecification;
use super::predicate::PredicateSet;
use super::query::{PageWindow, PaginatedResult};
use super::service::TransactionRepository;
use super::sort::SortOrder;
use super::summary::SummaryStats;
use super::transaction::Transaction;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// Point in time by which an operation must finish
///
/// Every storage call of one operation runs under the same deadline. When
/// it elapses the in-flight call is dropped (which cancels it) and the
/// operation fails with [`SalesError::Timeout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Deadline {
    at: Option<Instant>,
    budget: Duration,
}

impl Deadline {
    /// No time limit
    pub fn none() -> Self {
        Self::default()
    }

    /// Expire `budget` from now
    pub fn after(budget: Duration) -> Self {
        Self {
            at: Some(Instant::now() + budget),
            budget,
        }
    }

    /// Drive `fut` to completion or fail once the deadline passes
    pub async fn run<T, F>(self, operation: &'static str, fut: F) -> SalesResult<T>
    where
        F: Future<Output = SalesResult<T>>,
    {
        match self.at {
            None => fut.await,
            Some(at) => match tokio::time::timeout_at(at, fut).await {
                Ok(result) => result,
                Err(_) => {
                    tracing::warn!(
                        operation,
                        budget_ms = self.budget.as_millis() as u64,
                        "read operation timed out"
                    );
                    Err(SalesError::Timeout {
                        operation,
                        budget: self.budget,
                    })
                }
            },
        }
    }
}

/// Entry point for the three read operations
#[derive(Clone)]
pub struct SalesReader {
    repository: Arc<dyn TransactionRepository>,
}

impl SalesReader {
    pub fn new(repository: Arc<dyn TransactionRepository>) -> Self {
        Self { repository }
    }

    /// One ordered page of matching transactions plus the total match count
    ///
    /// The count is taken over the filtered set before sorting and paging.
    /// Any storage failure aborts the whole operation.
    pub async fn list_transactions(
        &self,
        spec: &FilterSpecification,
        deadline: Deadline,
    ) -> SalesResult<PaginatedResult<Transaction>> {
        let predicates = PredicateSet::from_spec(spec);
        let order = SortOrder::resolve(spec.sort_field.as_deref(), spec.sort_direction.as_deref());
        let window = PageWindow::new(spec.page, spec.page_size);

        deadline
            .run("list_transactions", async {
                let total = self
                    .repository
                    .count(&predicates)
                    .await
                    .map_err(|e| self.storage_error("count", e))?;

                let rows = self
                    .repository
                    .fetch(&predicates, order, window)
                    .await
                    .map_err(|e| self.storage_error("fetch", e))?;

                tracing::debug!(
                    predicates = predicates.len(),
                    %order,
                    total,
                    page = window.page(),
                    rows = rows.len(),
                    "listed transactions"
                );

                Ok(PaginatedResult::new(rows, total, window))
            })
            .await
    }

    /// Totals over every matching transaction; sort and page are ignored
    pub async fn summarize(
        &self,
        spec: &FilterSpecification,
        deadline: Deadline,
    ) -> SalesResult<SummaryStats> {
        let predicates = PredicateSet::from_spec(spec);

        deadline
            .run("summarize", async {
                let stats = self
                    .repository
                    .aggregate(&predicates)
                    .await
                    .map_err(|e| self.storage_error("aggregate", e))?;

                tracing::debug!(
                    predicates = predicates.len(),
                    total_transactions = stats.total_transactions,
                    "summarized transactions"
                );

                Ok(stats)
            })
            .await
    }

    /// Selectable values for every filter dimension over the whole dataset
    pub async fn filter_options(&self, deadline: Deadline) -> SalesResult<FilterOptions> {
        deadline
            .run("filter_options", async {
                let (genders, regions, categories, payment_methods, tags) = tokio::try_join!(
                    self.distinct(FacetColumn::Gender),
                    self.distinct(FacetColumn::Region),
                    self.distinct(FacetColumn::Category),
                    self.distinct(FacetColumn::PaymentMethod),
                    self.distinct(FacetColumn::Tags),
                )?;

                let options = FilterOptions {
                    regions: distinct_sorted(regions),
                    genders: distinct_sorted(genders),
                    categories: distinct_sorted(categories),
                    tags: flatten_tags(tags),
                    payment_methods: distinct_sorted(payment_methods),
                };

                tracing::debug!(
                    regions = options.regions.len(),
                    tags = options.tags.len(),
                    "collected filter options"
                );

                Ok(options)
            })
            .await
    }

    async fn distinct(&self, column: FacetColumn) -> SalesResult<Vec<String>> {
        self.repository
            .distinct_values(column)
            .await
            .map_err(|e| self.storage_error("distinct_values", e))
    }

    fn storage_error(&self, operation: &str, err: anyhow::Error) -> SalesError {
        let backend = self.repository.backend_name();
        tracing::warn!(backend, operation, error = %err, "storage call failed");
        SalesError::storage(backend, operation, err)
    }
}
