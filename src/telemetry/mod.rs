//! Telemetry module
//!
//! Logging and update metrics
//!
//! Metrics go through the `metrics` facade. No recorder is installed here;
//! a process embedding the updaters installs its own exporter to collect
//! them. The same per-run counts are logged.

mod counters;
mod logging;

pub use counters::{record_inserts, record_update};
pub use logging::init_logging;

use crate::config::TelemetryConfig;

/// Initialize all telemetry subsystems
pub fn init_telemetry(config: &TelemetryConfig) -> anyhow::Result<()> {
    init_logging(&config.log_level, config.log_format)
}
