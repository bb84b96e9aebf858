//! Storage implementations for different backends

pub mod in_memory;
#[cfg(feature = "mysql")]
pub mod mysql;
pub mod seed;
pub mod sql;

pub use in_memory::InMemoryTransactionRepository;
#[cfg(feature = "mysql")]
pub use mysql::MysqlTransactionRepository;
