//! Typed error handling for the sales query service
//!
//! Only two things can go wrong while answering a read: the store fails, or
//! the operation runs past its deadline. Malformed request parameters are
//! never an error (they are defaulted during normalization), so there is no
//! validation category here.
//!
//! # Error Categories
//!
//! - [`StorageError`]: the storage backend failed during count/fetch/aggregate
//! - [`SalesError::Timeout`]: the operation's deadline elapsed
//!
//! [`ConfigError`] lives here too but is reported at startup, never over HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! match reader.summarize(&spec, Deadline::none()).await {
//!     Ok(stats) => println!("{} transactions", stats.total_transactions),
//!     Err(SalesError::Timeout { operation, .. }) => eprintln!("{} timed out", operation),
//!     Err(e) => eprintln!("failed: {}", e),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::time::Duration;
use thiserror::Error;

/// Result alias used by the read operations
pub type SalesResult<T> = std::result::Result<T, SalesError>;

/// The main error type for the service
#[derive(Debug, Error)]
pub enum SalesError {
    /// Storage backend errors
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The operation did not finish before its deadline
    #[error("{operation} did not complete within {}ms", .budget.as_millis())]
    Timeout {
        operation: &'static str,
        budget: Duration,
    },
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl SalesError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            SalesError::Storage(e) => e.status_code(),
            SalesError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            SalesError::Storage(e) => e.error_code(),
            SalesError::Timeout { .. } => "QUERY_TIMEOUT",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            SalesError::Timeout { operation, budget } => Some(serde_json::json!({
                "operation": operation,
                "timeout_ms": budget.as_millis() as u64,
            })),
            SalesError::Storage(StorageError::QueryError { backend, .. })
            | SalesError::Storage(StorageError::ConnectionError { backend, .. })
            | SalesError::Storage(StorageError::Unavailable { backend }) => {
                Some(serde_json::json!({ "backend": backend }))
            }
            _ => None,
        }
    }

    /// Wrap a backend failure raised while running `operation`
    ///
    /// A [`StorageError`] raised by the backend keeps its category; any
    /// other failure becomes a [`StorageError::QueryError`].
    pub fn storage(backend: &str, operation: &str, err: anyhow::Error) -> Self {
        match err.downcast::<StorageError>() {
            Ok(storage) => SalesError::Storage(storage),
            Err(err) => SalesError::Storage(StorageError::QueryError {
                backend: backend.to_string(),
                message: format!("{} failed: {:#}", operation, err),
            }),
        }
    }
}

impl IntoResponse for SalesError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

// =============================================================================
// Storage Errors
// =============================================================================

/// Errors related to storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Connection error
    #[error("Failed to connect to {backend}: {message}")]
    ConnectionError { backend: String, message: String },

    /// Query execution error
    #[error("{backend} query error: {message}")]
    QueryError { backend: String, message: String },

    /// Stored data could not be decoded
    #[error("Data integrity error: {message}")]
    IntegrityError { message: String },

    /// Backend not available
    #[error("Storage backend '{backend}' is unavailable")]
    Unavailable { backend: String },
}

impl StorageError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            StorageError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            StorageError::ConnectionError { .. } => "STORAGE_CONNECTION_ERROR",
            StorageError::QueryError { .. } => "STORAGE_ERROR",
            StorageError::IntegrityError { .. } => "STORAGE_INTEGRITY_ERROR",
            StorageError::Unavailable { .. } => "STORAGE_UNAVAILABLE",
        }
    }
}

// =============================================================================
// Config Errors
// =============================================================================

/// Errors related to configuration parsing and validation
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read or parse a configuration file
    #[error("Failed to parse configuration: {message}")]
    ParseError { message: String },

    /// A required setting is missing
    #[error("Missing required configuration field '{field}'")]
    MissingField { field: String },

    /// A setting has an unusable value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}
