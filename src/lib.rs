//! # Sales Query
//!
//! Filtered, sorted, paginated reads and roll-up summaries over a fixed-shape
//! sales transaction record set, plus distinct-value facets for filter UIs.
//!
//! ## Features
//!
//! - **Lenient Parameters**: malformed page/size/age values fall back to defaults
//! - **Typed Predicates**: one `PredicateSet` defines "what matches" for every read
//! - **Allow-listed Sorting**: date, quantity or customer name, newest first by default
//! - **Consistent Paging**: totals counted before paging, stable tie-break on id
//! - **Pluggable Storage**: in-memory store by default, MySQL behind the `mysql` feature
//! - **Deadlines**: every read can be bounded and is cancelled when it expires
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use sales_query::prelude::*;
//!
//! let repository = InMemoryTransactionRepository::with_transactions(rows);
//! let reader = SalesReader::new(Arc::new(repository));
//!
//! let spec = FilterParams::from_pairs([("region", "North"), ("pageSize", "20")]).normalize();
//! let page = reader.list_transactions(&spec, Deadline::none()).await?;
//! let totals = reader.summarize(&spec, Deadline::none()).await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        Deadline, FacetColumn, FilterOptions, FilterParams, FilterSpecification, PageWindow,
        PaginatedResult, PredicateSet, SalesError, SalesReader, SalesResult, SortOrder,
        SummaryStats, Transaction, TransactionImporter, TransactionRepository,
    };

    // === Storage ===
    pub use crate::storage::InMemoryTransactionRepository;
    #[cfg(feature = "mysql")]
    pub use crate::storage::MysqlTransactionRepository;
    pub use crate::storage::seed::{load_fixture, seed_from_fixture, seed_if_empty};

    // === Config ===
    pub use crate::config::{ServiceConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
}
