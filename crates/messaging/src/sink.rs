//! Counter/value emission to an external metrics system.

use std::sync::{Arc, RwLock};

/// Metric emission capability.
///
/// A thin front over the metrics recorder so services can be wired
/// with a recording double and tests can assert on emitted counters.
pub trait MetricsSink: Send + Sync {
    /// Increments a counter by one, with optional dimension labels.
    fn incr(&self, name: &'static str, labels: &[(&'static str, &str)]);

    /// Records a gauge value.
    fn gauge(&self, name: &'static str, value: f64);
}

/// Sink forwarding to the global `metrics` recorder.
///
/// In production the recorder is the Prometheus exporter installed at
/// startup; without a recorder the emission is a no-op.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrometheusSink;

impl MetricsSink for PrometheusSink {
    fn incr(&self, name: &'static str, labels: &[(&'static str, &str)]) {
        let labels: Vec<metrics::Label> = labels
            .iter()
            .map(|(key, value)| metrics::Label::new(*key, value.to_string()))
            .collect();
        metrics::counter!(name, labels).increment(1);
    }

    fn gauge(&self, name: &'static str, value: f64) {
        metrics::gauge!(name).set(value);
    }
}

#[derive(Debug, Default)]
struct RecordingState {
    counters: Vec<(String, Vec<(String, String)>)>,
    gauges: Vec<(String, f64)>,
}

/// Recording sink for tests.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    state: Arc<RwLock<RecordingState>>,
}

impl RecordingSink {
    /// Creates a new recording sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total increments recorded for the given counter name.
    pub fn count(&self, name: &str) -> usize {
        self.state
            .read()
            .unwrap()
            .counters
            .iter()
            .filter(|(n, _)| n == name)
            .count()
    }

    /// Increments recorded for the counter carrying the given label.
    pub fn count_with(&self, name: &str, label: (&str, &str)) -> usize {
        self.state
            .read()
            .unwrap()
            .counters
            .iter()
            .filter(|(n, labels)| {
                n == name && labels.iter().any(|(k, v)| k == label.0 && v == label.1)
            })
            .count()
    }

    /// All values recorded for the given gauge name.
    pub fn gauge_values(&self, name: &str) -> Vec<f64> {
        self.state
            .read()
            .unwrap()
            .gauges
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, v)| *v)
            .collect()
    }
}

impl MetricsSink for RecordingSink {
    fn incr(&self, name: &'static str, labels: &[(&'static str, &str)]) {
        let labels = labels
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.state
            .write()
            .unwrap()
            .counters
            .push((name.to_string(), labels));
    }

    fn gauge(&self, name: &'static str, value: f64) {
        self.state
            .write()
            .unwrap()
            .gauges
            .push((name.to_string(), value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_sink_counts_by_name() {
        let sink = RecordingSink::new();
        sink.incr("orders_created_total", &[]);
        sink.incr("orders_created_total", &[]);
        sink.incr("order_creation_errors_total", &[]);

        assert_eq!(sink.count("orders_created_total"), 2);
        assert_eq!(sink.count("order_creation_errors_total"), 1);
        assert_eq!(sink.count("unknown"), 0);
    }

    #[test]
    fn recording_sink_counts_by_label() {
        let sink = RecordingSink::new();
        sink.incr("payments_processed_total", &[("status", "success")]);
        sink.incr("payments_processed_total", &[("status", "failed")]);
        sink.incr("payments_processed_total", &[("status", "success")]);

        assert_eq!(
            sink.count_with("payments_processed_total", ("status", "success")),
            2
        );
        assert_eq!(
            sink.count_with("payments_processed_total", ("status", "failed")),
            1
        );
    }

    #[test]
    fn recording_sink_captures_gauges() {
        let sink = RecordingSink::new();
        sink.gauge("order_value", 20.0);
        sink.gauge("order_value", 35.5);

        assert_eq!(sink.gauge_values("order_value"), vec![20.0, 35.5]);
    }
}
