//! Core module containing the query engine: record shape, filter
//! normalization, predicates, sorting, paging, aggregation and facets

pub mod error;
pub mod facets;
pub mod filter;
pub mod params;
pub mod predicate;
pub mod query;
pub mod reader;
pub mod service;
pub mod sort;
pub mod summary;
pub mod transaction;

pub use error::{ConfigError, ErrorResponse, SalesError, SalesResult, StorageError};
pub use facets::{FacetColumn, FilterOptions};
pub use filter::FilterSpecification;
pub use params::FilterParams;
pub use predicate::{Dimension, Operator, Predicate, PredicateSet};
pub use query::{PageWindow, PaginatedResult};
pub use reader::{Deadline, SalesReader};
pub use service::{TransactionImporter, TransactionRepository};
pub use sort::{SortDirection, SortKey, SortOrder};
pub use summary::SummaryStats;
pub use transaction::{Customer, Logistics, Product, SalesInfo, Transaction};
