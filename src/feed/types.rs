//! Feed types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single entry from a feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    /// Provider-assigned identifier (guid / atom id)
    pub unique_id: String,
    pub title: String,
    pub link: String,
    pub published_at: DateTime<Utc>,
}
