//! Update routines
//!
//! Each updater is one fetch-parse-store pass. Scheduling and retries belong
//! to whatever invokes the binary.

mod feed;
mod price;

pub use feed::FeedUpdater;
pub use price::PriceUpdater;

use crate::error::UpdateError;
use crate::telemetry;
use async_trait::async_trait;
use std::time::Instant;

/// Trait for update routines
#[async_trait]
pub trait Updater: Send + Sync {
    /// Short name used in logs and metrics
    fn name(&self) -> &'static str;

    /// Run one update cycle
    async fn update(&self) -> Result<(), UpdateError>;
}

/// Run an updater once, recording duration and outcome
pub async fn run_updater(updater: &dyn Updater) -> Result<(), UpdateError> {
    let name = updater.name();
    let started = Instant::now();

    tracing::info!(updater = name, "Update starting");
    let result = updater.update().await;
    let elapsed = started.elapsed();

    telemetry::record_update(name, result.as_ref().err(), elapsed);

    match &result {
        Ok(()) => {
            tracing::info!(updater = name, elapsed_ms = elapsed.as_millis() as u64, "Update finished");
        }
        Err(e) => {
            tracing::error!(
                updater = name,
                kind = e.kind(),
                error = %e,
                elapsed_ms = elapsed.as_millis() as u64,
                "Update failed"
            );
        }
    }

    result
}
