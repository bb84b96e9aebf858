//! One-time population of an empty store from a JSON fixture

use crate::core::{Transaction, TransactionImporter};
use anyhow::{Context, Result};
use std::path::Path;

/// Records written per import call
pub const SEED_BATCH_SIZE: usize = 100;

/// Read a JSON array of transactions
pub fn load_fixture(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixture {}", path.display()))?;
    let records: Vec<Transaction> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse fixture {}", path.display()))?;
    Ok(records)
}

/// Import `records` unless the store already holds data
///
/// Returns the number of records written (0 when skipped).
pub async fn seed_if_empty(importer: &dyn TransactionImporter, records: &[Transaction]) -> Result<u64> {
    let existing = importer.record_count().await?;
    if existing > 0 {
        tracing::info!(existing, "store already populated, skipping seed");
        return Ok(0);
    }

    for (index, batch) in records.chunks(SEED_BATCH_SIZE).enumerate() {
        importer
            .import(batch)
            .await
            .with_context(|| format!("Failed to import batch {}", index))?;
    }

    tracing::info!(imported = records.len(), "seeded transaction store");
    Ok(records.len() as u64)
}

/// Load `fixture` and seed the store from it, logging instead of failing
///
/// A missing or malformed fixture, or a failed import, leaves the service
/// able to start with whatever the store already holds. Returns the number
/// of records written, or `None` when seeding failed.
pub async fn seed_from_fixture(
    importer: &dyn TransactionImporter,
    fixture: impl AsRef<Path>,
) -> Option<u64> {
    let fixture = fixture.as_ref();
    let result = match load_fixture(fixture) {
        Ok(records) => seed_if_empty(importer, &records).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(written) => Some(written),
        Err(e) => {
            tracing::warn!(
                fixture = %fixture.display(),
                error = %format!("{:#}", e),
                "data seeding skipped or failed"
            );
            None
        }
    }
}
