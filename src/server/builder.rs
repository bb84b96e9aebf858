//! ServerBuilder for fluent API to build HTTP servers

use super::handlers::{self, AppState};
use crate::config::ServiceConfig;
use crate::core::{SalesReader, TransactionRepository};
use anyhow::Result;
use axum::Router;
use axum::http::Method;
use axum::routing::get;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Builder for creating the HTTP server around a transaction repository
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_repository(InMemoryTransactionRepository::new())
///     .with_config(config)
///     .build()?;
/// ```
pub struct ServerBuilder {
    repository: Option<Arc<dyn TransactionRepository>>,
    config: ServiceConfig,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with the default configuration
    pub fn new() -> Self {
        Self {
            repository: None,
            config: ServiceConfig::default_config(),
            custom_routes: Vec::new(),
        }
    }

    /// Set the transaction repository (required)
    pub fn with_repository(self, repository: impl TransactionRepository + 'static) -> Self {
        self.with_shared_repository(Arc::new(repository))
    }

    /// Set an already shared transaction repository
    pub fn with_shared_repository(mut self, repository: Arc<dyn TransactionRepository>) -> Self {
        self.repository = Some(repository);
        self
    }

    /// Use `config` for the query deadline and bind address
    pub fn with_config(mut self, config: ServiceConfig) -> Self {
        self.config = config;
        self
    }

    /// Add custom routes to the server
    ///
    /// # Example
    ///
    /// ```ignore
    /// use axum::{Router, routing::get};
    ///
    /// let extra = Router::new().route("/version", get(version_handler));
    ///
    /// ServerBuilder::new()
    ///     .with_repository(repository)
    ///     .with_custom_routes(extra)
    ///     .build()?;
    /// ```
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    /// Build the final REST router
    ///
    /// This generates:
    /// - the index and health routes
    /// - the list, summary and filter-option routes
    /// - any custom routes
    ///
    /// wrapped in a permissive CORS layer and a request tracing layer.
    pub fn build(mut self) -> Result<Router> {
        let repository = self.repository.take().ok_or_else(|| {
            anyhow::anyhow!("TransactionRepository is required. Call .with_repository()")
        })?;

        let state = AppState::new(SalesReader::new(repository), self.config.query_timeout());

        let mut app = Router::new()
            .route("/", get(handlers::index))
            .route("/health", get(handlers::health_check))
            .route("/healthz", get(handlers::health_check))
            .route("/api/sales", get(handlers::list_sales))
            .route("/api/sales/summary", get(handlers::sales_summary))
            .route("/api/filters/options", get(handlers::filter_options))
            .with_state(state);

        for custom_router in self.custom_routes {
            app = app.merge(custom_router);
        }

        Ok(app.layer(cors_layer()).layer(TraceLayer::new_for_http()))
    }

    /// Serve the application with graceful shutdown
    ///
    /// This will:
    /// - Bind to the provided address
    /// - Start serving requests
    /// - Handle SIGTERM and SIGINT (Ctrl+C) for graceful shutdown
    ///
    /// # Example
    ///
    /// ```ignore
    /// ServerBuilder::new()
    ///     .with_repository(repository)
    ///     .serve("127.0.0.1:8080").await?;
    /// ```
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build()?;
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Every origin may call the API
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
