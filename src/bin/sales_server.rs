//! Sales query HTTP server
//!
//! Usage: `sales-server [config.yaml]`
//!
//! A missing configuration file is not an error: the defaults (in-memory
//! store on port 8080) apply. `PORT` and `DB_DSN` override the file.

use anyhow::Context;
use sales_query::prelude::*;
use sales_query::storage::seed;
use std::path::Path;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,sales_query=debug")),
        )
        .init();

    let config = load_config()?;
    let (repository, importer) = open_store(&config).await?;

    if let Some(fixture) = &config.seed.fixture {
        seed::seed_from_fixture(importer.as_ref(), fixture).await;
    }

    let bind = config.server.bind.clone();
    tracing::info!(
        backend = repository.backend_name(),
        timeout_ms = config.query.timeout_ms,
        "starting sales query service"
    );

    ServerBuilder::new()
        .with_shared_repository(repository)
        .with_config(config)
        .serve(&bind)
        .await
}

fn load_config() -> Result<ServiceConfig> {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut config = if Path::new(&path).exists() {
        tracing::info!(path = %path, "loading configuration");
        ServiceConfig::from_yaml_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path))?
    } else {
        tracing::info!(path = %path, "configuration file not found, using defaults");
        ServiceConfig::default_config()
    };

    config.apply_env_overrides();
    config.validate()?;
    Ok(config)
}

async fn open_store(
    config: &ServiceConfig,
) -> Result<(Arc<dyn TransactionRepository>, Arc<dyn TransactionImporter>)> {
    match config.storage.backend {
        StorageBackend::InMemory => {
            let store = Arc::new(InMemoryTransactionRepository::new());
            let repository: Arc<dyn TransactionRepository> = store.clone();
            let importer: Arc<dyn TransactionImporter> = store;
            Ok((repository, importer))
        }
        #[cfg(feature = "mysql")]
        StorageBackend::Mysql => {
            let dsn = config.storage.dsn.as_deref().unwrap_or_default();
            let store = Arc::new(MysqlTransactionRepository::connect(dsn).await?);
            let repository: Arc<dyn TransactionRepository> = store.clone();
            let importer: Arc<dyn TransactionImporter> = store;
            Ok((repository, importer))
        }
        #[cfg(not(feature = "mysql"))]
        StorageBackend::Mysql => {
            anyhow::bail!("storage backend 'mysql' requires building with the `mysql` feature")
        }
    }
}
