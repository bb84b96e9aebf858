//! HTTP handlers for the read operations
//!
//! Query strings are taken as raw key/value pairs so repeated keys
//! (`region=North&region=South`) survive, then normalized by
//! [`FilterParams`]. Parameter problems never produce an error response;
//! only storage failures and timeouts do.

use axum::{
    Json,
    extract::{Query, State},
};
use serde_json::{Value, json};
use std::time::Duration;

use crate::core::{
    Deadline, FilterOptions, FilterParams, PaginatedResult, SalesError, SalesReader, SummaryStats,
    Transaction,
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub reader: SalesReader,
    /// Deadline applied to every read operation; `None` waits indefinitely
    pub query_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(reader: SalesReader, query_timeout: Option<Duration>) -> Self {
        Self {
            reader,
            query_timeout,
        }
    }

    fn deadline(&self) -> Deadline {
        self.query_timeout.map_or_else(Deadline::none, Deadline::after)
    }
}

/// GET /api/sales
pub async fn list_sales(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<PaginatedResult<Transaction>>, SalesError> {
    let spec = FilterParams::from_pairs(pairs).normalize();
    let page = state.reader.list_transactions(&spec, state.deadline()).await?;
    Ok(Json(page))
}

/// GET /api/sales/summary
///
/// Sort and page parameters are accepted and ignored.
pub async fn sales_summary(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<SummaryStats>, SalesError> {
    let spec = FilterParams::from_pairs(pairs).normalize();
    let stats = state.reader.summarize(&spec, state.deadline()).await?;
    Ok(Json(stats))
}

/// GET /api/filters/options
pub async fn filter_options(
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, SalesError> {
    let options = state.reader.filter_options(state.deadline()).await?;
    Ok(Json(options))
}

/// GET /
pub async fn index() -> Json<Value> {
    Json(json!({
        "service": "sales-query",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "transactions": "/api/sales",
            "summary": "/api/sales/summary",
            "filter_options": "/api/filters/options",
            "health": "/health"
        }
    }))
}

/// GET /health, GET /healthz
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "sales-query"
    }))
}
