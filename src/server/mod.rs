//! Server module exposing the read operations over HTTP
//!
//! This module provides a `ServerBuilder` that registers:
//! - `GET /api/sales` (paginated transaction list)
//! - `GET /api/sales/summary` (totals for the same filters)
//! - `GET /api/filters/options` (selectable filter values)
//! - index and health routes

pub mod builder;
pub mod handlers;

pub use builder::ServerBuilder;
pub use handlers::AppState;
