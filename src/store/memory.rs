//! In-process store
//!
//! Keeps records in memory, counts open connections and can be told to
//! reject writes. Used to exercise the updaters without a database file.

use super::{FeedPost, PriceRecord, Store, StoreConnection};
use crate::error::StoreError;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

#[derive(Debug, Default)]
struct MemoryState {
    prices: Vec<PriceRecord>,
    posts: Vec<FeedPost>,
    post_insert_attempts: usize,
    fail_post_insert_at: Option<usize>,
    reject_prices: bool,
}

/// Store holding everything in a shared `Vec`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<MemoryState>>,
    open: Arc<AtomicUsize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail the `n`th post insert attempt (1-based) with
    /// [`StoreError::Rejected`]
    pub fn fail_post_insert_at(self, n: usize) -> Self {
        self.lock().fail_post_insert_at = Some(n);
        self
    }

    /// Reject every price insert
    pub fn reject_prices(self) -> Self {
        self.lock().reject_prices = true;
        self
    }

    /// Stored prices in insertion order
    pub fn prices(&self) -> Vec<PriceRecord> {
        self.lock().prices.clone()
    }

    /// Stored posts in insertion order
    pub fn posts(&self) -> Vec<FeedPost> {
        self.lock().posts.clone()
    }

    /// Number of post inserts tried, including rejected ones
    pub fn post_insert_attempts(&self) -> usize {
        self.lock().post_insert_attempts
    }

    /// Connections handed out and not yet dropped
    pub fn open_connections(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Store for MemoryStore {
    fn connect(&self) -> Result<Box<dyn StoreConnection>, StoreError> {
        self.open.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MemoryConnection {
            store: self.clone(),
        }))
    }
}

struct MemoryConnection {
    store: MemoryStore,
}

impl Drop for MemoryConnection {
    fn drop(&mut self) {
        self.store.open.fetch_sub(1, Ordering::SeqCst);
    }
}

impl StoreConnection for MemoryConnection {
    fn insert_price(&self, record: &PriceRecord) -> Result<(), StoreError> {
        let mut state = self.store.lock();
        if state.reject_prices {
            return Err(StoreError::Rejected("price inserts disabled".to_string()));
        }
        state.prices.push(record.clone());
        Ok(())
    }

    fn latest_price(&self) -> Result<Option<PriceRecord>, StoreError> {
        let state = self.store.lock();
        // max_by_key keeps the last maximum, so equal minutes resolve to the
        // latest insert
        Ok(state
            .prices
            .iter()
            .max_by_key(|p| p.generated_at)
            .cloned())
    }

    fn insert_post(&self, post: &FeedPost) -> Result<(), StoreError> {
        let mut state = self.store.lock();
        state.post_insert_attempts += 1;

        if state.fail_post_insert_at == Some(state.post_insert_attempts) {
            return Err(StoreError::Rejected(format!(
                "post {} refused",
                post.unique_id
            )));
        }

        let duplicate = state
            .posts
            .iter()
            .any(|p| p.source == post.source && p.unique_id == post.unique_id);
        if duplicate {
            return Err(StoreError::Rejected(format!(
                "duplicate post {} for {}",
                post.unique_id, post.source
            )));
        }

        state.posts.push(post.clone());
        Ok(())
    }

    fn post_exists(&self, source: &str, unique_id: &str) -> Result<bool, StoreError> {
        let state = self.store.lock();
        Ok(state
            .posts
            .iter()
            .any(|p| p.source == source && p.unique_id == unique_id))
    }

    fn recent_posts(&self, limit: usize) -> Result<Vec<FeedPost>, StoreError> {
        let mut posts = self.store.lock().posts.clone();
        // Stable sort, then reverse: newest first, later inserts first on ties
        posts.sort_by_key(|p| p.published_at);
        posts.reverse();
        posts.truncate(limit);
        Ok(posts)
    }
}
