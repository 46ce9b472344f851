//! Feed updater
//!
//! Stores feed items that have not been seen before under a fixed source
//! label. Inserts are not transactional: if one fails, the posts stored
//! before it stay and the rest are skipped until the next run.

use super::Updater;
use crate::config::FeedConfig;
use crate::error::UpdateError;
use crate::feed::{FeedItem, FeedSource, HttpFeed};
use crate::store::{FeedPost, Store, StoreConnection};
use crate::telemetry;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;

/// Copies new feed items into the store
pub struct FeedUpdater {
    feed: Box<dyn FeedSource>,
    source: String,
    store: Arc<dyn Store>,
}

impl FeedUpdater {
    pub fn new(feed: Box<dyn FeedSource>, source: impl Into<String>, store: Arc<dyn Store>) -> Self {
        Self {
            feed,
            source: source.into(),
            store,
        }
    }

    /// Create an updater for the feed and label in `config`
    pub fn from_config(config: &FeedConfig, client: Client, store: Arc<dyn Store>) -> Self {
        Self::new(
            Box::new(HttpFeed::from_config(client, config)),
            config.source.clone(),
            store,
        )
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Fetch the feed and store unseen items, returning the stored posts
    pub async fn update_posts(&self) -> Result<Vec<FeedPost>, UpdateError> {
        let items = self.feed.fetch_items().await?;
        let fetched = items.len();

        let conn = self.store.connect()?;
        let posts = self.new_posts(conn.as_ref(), items)?;
        tracing::debug!(source = %self.source, fetched, new = posts.len(), "Filtered feed items");

        for (inserted, post) in posts.iter().enumerate() {
            if let Err(e) = conn.insert_post(post) {
                telemetry::record_inserts("post", inserted as u64);
                tracing::warn!(
                    source = %self.source,
                    unique_id = %post.unique_id,
                    inserted,
                    "Post insert failed, stopping"
                );
                return Err(e.into());
            }
        }

        telemetry::record_inserts("post", posts.len() as u64);
        Ok(posts)
    }

    /// Items whose id is not yet stored for this source, as posts, in feed
    /// order. One lookup per item; repeats within the same fetch are dropped.
    fn new_posts(
        &self,
        conn: &dyn StoreConnection,
        items: Vec<FeedItem>,
    ) -> Result<Vec<FeedPost>, UpdateError> {
        let mut posts = Vec::new();
        for item in items {
            let repeated = posts.iter().any(|p: &FeedPost| p.unique_id == item.unique_id);
            if repeated || conn.post_exists(&self.source, &item.unique_id)? {
                continue;
            }
            posts.push(FeedPost {
                title: item.title,
                source: self.source.clone(),
                url: item.link,
                unique_id: item.unique_id,
                published_at: item.published_at,
            });
        }
        Ok(posts)
    }
}

#[async_trait]
impl Updater for FeedUpdater {
    fn name(&self) -> &'static str {
        "feed"
    }

    async fn update(&self) -> Result<(), UpdateError> {
        let posts = self.update_posts().await?;
        tracing::info!(source = %self.source, new_posts = posts.len(), "Stored feed posts");
        Ok(())
    }
}
