//! Feed fetched over HTTP

use super::{FeedItem, FeedSource};
use crate::config::FeedConfig;
use crate::error::UpdateError;
use crate::http;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use feed_rs::model::Entry;
use feed_rs::parser::{self, ParseFeedError};
use reqwest::Client;

/// RSS or Atom feed at a fixed URL
pub struct HttpFeed {
    client: Client,
    url: String,
}

impl HttpFeed {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn from_config(client: Client, config: &FeedConfig) -> Self {
        Self::new(client, config.url.clone())
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl FeedSource for HttpFeed {
    async fn fetch_items(&self) -> Result<Vec<FeedItem>, UpdateError> {
        let body = http::get_bytes(&self.client, &self.url).await?;
        let items = parse_feed(&body, Utc::now()).map_err(|source| UpdateError::Feed {
            url: self.url.clone(),
            source,
        })?;

        tracing::debug!(url = %self.url, items = items.len(), "Fetched feed");
        Ok(items)
    }
}

/// Parse an RSS or Atom document into items, keeping document order
///
/// Entries without a date are stamped with `fetched_at`.
pub fn parse_feed(body: &[u8], fetched_at: DateTime<Utc>) -> Result<Vec<FeedItem>, ParseFeedError> {
    let feed = parser::parse(body)?;
    Ok(feed
        .entries
        .into_iter()
        .map(|entry| to_item(entry, fetched_at))
        .collect())
}

fn to_item(entry: Entry, fetched_at: DateTime<Utc>) -> FeedItem {
    let title = entry
        .title
        .map(|t| t.content.trim().to_string())
        .unwrap_or_default();
    let link = entry
        .links
        .into_iter()
        .next()
        .map(|l| l.href)
        .unwrap_or_default();

    FeedItem {
        unique_id: entry.id,
        title,
        link,
        published_at: entry.published.or(entry.updated).unwrap_or(fetched_at),
    }
}
