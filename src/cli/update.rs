//! Update command implementation

use crate::config::Config;
use crate::http;
use crate::store::{SqliteStore, Store};
use crate::updater::{run_updater, FeedUpdater, PriceUpdater, Updater};
use std::sync::Arc;

/// Updater selected on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateTarget {
    Price,
    Feed,
}

/// Run the selected updaters in order
///
/// A failing updater does not stop the ones after it; the command fails if
/// any of them failed.
pub async fn run_updates(config: &Config, targets: &[UpdateTarget]) -> anyhow::Result<()> {
    let client = http::build_client(&config.http)?;
    let store: Arc<dyn Store> = Arc::new(SqliteStore::open(&config.database.path)?);

    let mut failures = Vec::new();
    for target in targets {
        let updater: Box<dyn Updater> = match target {
            UpdateTarget::Price => Box::new(PriceUpdater::from_config(
                &config.price,
                client.clone(),
                store.clone(),
            )),
            UpdateTarget::Feed => Box::new(FeedUpdater::from_config(
                &config.feed,
                client.clone(),
                store.clone(),
            )),
        };

        if let Err(e) = run_updater(updater.as_ref()).await {
            failures.push((updater.name(), e));
        }
    }

    match failures.len() {
        0 => Ok(()),
        1 => {
            let (name, e) = failures.remove(0);
            Err(anyhow::Error::new(e).context(format!("{} update failed", name)))
        }
        _ => {
            let names: Vec<_> = failures.iter().map(|(name, _)| *name).collect();
            anyhow::bail!("{} updates failed", names.join(" and "))
        }
    }
}
