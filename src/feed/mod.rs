//! Feed module
//!
//! Fetches RSS/Atom feeds and flattens their entries into [`FeedItem`]s

mod http_feed;
mod types;

pub use http_feed::{parse_feed, HttpFeed};
pub use types::FeedItem;

use crate::error::UpdateError;
use async_trait::async_trait;

/// Trait for feed implementations
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetch the current items, in feed order
    async fn fetch_items(&self) -> Result<Vec<FeedItem>, UpdateError>;
}
