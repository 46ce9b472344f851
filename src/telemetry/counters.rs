//! Update metrics
//!
//! Emitted through the `metrics` facade. Without an installed recorder the
//! calls are no-ops; the matching counts are logged at debug level.

use crate::error::UpdateError;
use std::time::Duration;

/// Record the outcome and duration of one update
pub fn record_update(updater: &'static str, error: Option<&UpdateError>, elapsed: Duration) {
    let outcome = error.map(UpdateError::kind).unwrap_or("ok");

    metrics::counter!("board_updates_total", "updater" => updater, "outcome" => outcome)
        .increment(1);
    metrics::histogram!("board_update_duration_seconds", "updater" => updater)
        .record(elapsed.as_secs_f64());
    tracing::debug!(updater, outcome, elapsed_ms = elapsed.as_millis() as u64, "Recorded update");
}

/// Record records written to the store
pub fn record_inserts(kind: &'static str, count: u64) {
    if count == 0 {
        return;
    }
    metrics::counter!("board_records_inserted_total", "kind" => kind).increment(count);
    tracing::debug!(kind, count, "Recorded inserts");
}

#[cfg(test)]
mod tests {
    use super::*;
    use metrics::{
        Counter, Gauge, Histogram, Key, KeyName, Metadata, Recorder, SharedString, Unit,
    };
    use std::sync::Mutex;

    /// Records the name of every metric registered through it
    #[derive(Default)]
    struct NameRecorder {
        names: Mutex<Vec<String>>,
    }

    impl NameRecorder {
        fn names(&self) -> Vec<String> {
            self.names.lock().unwrap().clone()
        }

        fn push(&self, key: &Key) {
            self.names.lock().unwrap().push(key.name().to_string());
        }
    }

    impl Recorder for NameRecorder {
        fn describe_counter(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_gauge(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}
        fn describe_histogram(&self, _: KeyName, _: Option<Unit>, _: SharedString) {}

        fn register_counter(&self, key: &Key, _: &Metadata<'_>) -> Counter {
            self.push(key);
            Counter::noop()
        }

        fn register_gauge(&self, key: &Key, _: &Metadata<'_>) -> Gauge {
            self.push(key);
            Gauge::noop()
        }

        fn register_histogram(&self, key: &Key, _: &Metadata<'_>) -> Histogram {
            self.push(key);
            Histogram::noop()
        }
    }

    #[test]
    fn test_update_metrics_reach_recorder() {
        let recorder = NameRecorder::default();
        metrics::with_local_recorder(&recorder, || {
            record_update("price", None, Duration::from_millis(120));
            record_inserts("price", 1);
        });

        assert_eq!(
            recorder.names(),
            vec![
                "board_updates_total",
                "board_update_duration_seconds",
                "board_records_inserted_total",
            ]
        );
    }

    #[test]
    fn test_zero_inserts_not_recorded() {
        let recorder = NameRecorder::default();
        metrics::with_local_recorder(&recorder, || record_inserts("post", 0));
        assert!(recorder.names().is_empty());
    }
}
