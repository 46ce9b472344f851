//! board-updater: price and feed updaters for the BTB community board
//!
//! This library provides the components for:
//! - USD/BTC and BTB/BTC quotes from remote JSON APIs
//! - RSS/Atom feed fetching
//! - Price snapshots with percent change against the previous snapshot
//! - Deduplicated feed posts
//! - SQLite persistence with connection-per-update semantics
//! - Logging and update metrics
//!
//! Each updater runs once per invocation; scheduling is left to the caller.

pub mod cli;
pub mod config;
pub mod error;
pub mod feed;
pub mod http;
pub mod quote;
pub mod store;
pub mod telemetry;
pub mod updater;
