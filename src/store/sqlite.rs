//! SQLite-backed store

use super::{ExchangePrice, FeedPost, PriceRecord, Store, StoreConnection};
use crate::error::StoreError;
use chrono::{DateTime, TimeZone, Utc};
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};
use std::path::{Path, PathBuf};
use std::time::Duration;

const SCHEMA: &str = "
    CREATE TABLE IF NOT EXISTS prices (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        usd_per_btc     REAL NOT NULL,
        secondary_btc   REAL NOT NULL,
        secondary_usd   REAL NOT NULL,
        generated_at    INTEGER NOT NULL,
        percent_change  REAL
    );
    CREATE INDEX IF NOT EXISTS idx_prices_generated_at ON prices (generated_at);

    CREATE TABLE IF NOT EXISTS posts (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        title           TEXT NOT NULL,
        source          TEXT NOT NULL,
        url             TEXT NOT NULL,
        unique_id       TEXT NOT NULL,
        published_at    INTEGER NOT NULL
    );
    CREATE UNIQUE INDEX IF NOT EXISTS idx_posts_source_unique_id ON posts (source, unique_id);
";

/// How long a connection waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Store that opens a fresh SQLite connection for every update
#[derive(Debug, Clone)]
pub struct SqliteStore {
    path: PathBuf,
    read_only: bool,
}

impl SqliteStore {
    /// Open (or create) the database file and make sure the schema exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let conn = Connection::open(&path)?;
        conn.execute_batch(SCHEMA)?;
        tracing::debug!(path = ?path, "SQLite schema ready");
        Ok(Self {
            path,
            read_only: false,
        })
    }

    /// Open an existing database for reading only
    ///
    /// Fails if the file does not exist; never creates files or schema.
    pub fn open_read_only(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        Connection::open_with_flags(&path, read_only_flags())?;
        Ok(Self {
            path,
            read_only: true,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Store for SqliteStore {
    fn connect(&self) -> Result<Box<dyn StoreConnection>, StoreError> {
        let conn = if self.read_only {
            Connection::open_with_flags(&self.path, read_only_flags())?
        } else {
            Connection::open(&self.path)?
        };
        conn.busy_timeout(BUSY_TIMEOUT)?;
        Ok(Box::new(SqliteConnection { conn }))
    }
}

/// One open SQLite connection, closed on drop
struct SqliteConnection {
    conn: Connection,
}

impl StoreConnection for SqliteConnection {
    fn insert_price(&self, record: &PriceRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO prices (usd_per_btc, secondary_btc, secondary_usd, generated_at, percent_change)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.usd_per_btc,
                record.secondary.btc,
                record.secondary.usd,
                record.generated_at.timestamp_millis(),
                record.percent_change,
            ],
        )?;
        Ok(())
    }

    fn latest_price(&self) -> Result<Option<PriceRecord>, StoreError> {
        let row = self
            .conn
            .query_row(
                "SELECT usd_per_btc, secondary_btc, secondary_usd, generated_at, percent_change
                 FROM prices
                 ORDER BY generated_at DESC, id DESC
                 LIMIT 1",
                [],
                |row| {
                    Ok((
                        row.get::<_, f64>(0)?,
                        row.get::<_, f64>(1)?,
                        row.get::<_, f64>(2)?,
                        row.get::<_, i64>(3)?,
                        row.get::<_, Option<f64>>(4)?,
                    ))
                },
            )
            .optional()?;

        row.map(|(usd_per_btc, btc, usd, generated_at, percent_change)| {
            Ok(PriceRecord {
                usd_per_btc,
                secondary: ExchangePrice { btc, usd },
                generated_at: from_millis("prices", generated_at)?,
                percent_change,
            })
        })
        .transpose()
    }

    fn insert_post(&self, post: &FeedPost) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT INTO posts (title, source, url, unique_id, published_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                post.title,
                post.source,
                post.url,
                post.unique_id,
                post.published_at.timestamp_millis(),
            ],
        )?;
        Ok(())
    }

    fn post_exists(&self, source: &str, unique_id: &str) -> Result<bool, StoreError> {
        let exists = self.conn.query_row(
            "SELECT EXISTS (SELECT 1 FROM posts WHERE source = ?1 AND unique_id = ?2)",
            params![source, unique_id],
            |row| row.get::<_, bool>(0),
        )?;
        Ok(exists)
    }

    fn recent_posts(&self, limit: usize) -> Result<Vec<FeedPost>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT title, source, url, unique_id, published_at
             FROM posts
             ORDER BY published_at DESC, id DESC
             LIMIT ?1",
        )?;

        let rows = stmt.query_map(params![limit as i64], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
            ))
        })?;

        let mut posts = Vec::new();
        for row in rows {
            let (title, source, url, unique_id, published_at) = row?;
            posts.push(FeedPost {
                title,
                source,
                url,
                unique_id,
                published_at: from_millis("posts", published_at)?,
            });
        }

        Ok(posts)
    }
}

fn read_only_flags() -> OpenFlags {
    OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX
}

fn from_millis(table: &'static str, millis: i64) -> Result<DateTime<Utc>, StoreError> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .ok_or_else(|| StoreError::Corrupt {
            table,
            reason: format!("timestamp out of range: {}", millis),
        })
}
