//! Persistence collaborator
//!
//! Updaters acquire one connection per call through [`Store::connect`]. The
//! connection is released when the returned box is dropped, so every exit
//! path (success, `?` early return, panic) gives it back.

mod memory;
mod models;
mod sqlite;

pub use memory::MemoryStore;
pub use models::{percent_change, truncate_to_minute, ExchangePrice, FeedPost, PriceRecord};
pub use sqlite::SqliteStore;

use crate::error::StoreError;

/// Source of scoped database connections
pub trait Store: Send + Sync {
    /// Open a connection for the duration of one update
    fn connect(&self) -> Result<Box<dyn StoreConnection>, StoreError>;
}

/// Operations an updater needs from an open connection
pub trait StoreConnection: Send {
    /// Persist a price snapshot
    fn insert_price(&self, record: &PriceRecord) -> Result<(), StoreError>;

    /// Most recent price snapshot by `generated_at`, latest insert winning
    /// ties
    fn latest_price(&self) -> Result<Option<PriceRecord>, StoreError>;

    /// Persist a feed post
    fn insert_post(&self, post: &FeedPost) -> Result<(), StoreError>;

    /// Whether a post with this id was already stored for `source`
    fn post_exists(&self, source: &str, unique_id: &str) -> Result<bool, StoreError>;

    /// Newest posts first, by publish date
    fn recent_posts(&self, limit: usize) -> Result<Vec<FeedPost>, StoreError>;
}
