use prometheus::Histogram;
use std::time::Instant;

/// RAII guard for measuring and recording latency
pub struct LatencyGuard {
    start: Instant,
    histogram: Histogram,
}

impl LatencyGuard {
    pub fn new(histogram: Histogram) -> Self {
        Self {
            start: Instant::now(),
            histogram,
        }
    }

    /// Start timing a request against `endpoint`, if metrics are enabled.
    pub fn for_endpoint(metrics: Option<&super::Metrics>, endpoint: &str) -> Option<Self> {
        metrics.map(|m| {
            Self::new(
                m.request_latency_seconds
                    .with_label_values(&[endpoint]),
            )
        })
    }
}

impl Drop for LatencyGuard {
    fn drop(&mut self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::observability::Metrics;
    use prometheus::{Histogram, HistogramOpts};

    #[test]
    fn test_latency_guard_records_time() {
        let opts = HistogramOpts::new("test_latency", "test");
        let histogram = Histogram::with_opts(opts).unwrap();

        {
            let _guard = LatencyGuard::new(histogram.clone());
            std::thread::sleep(std::time::Duration::from_millis(10));
        }

        assert!(histogram.get_sample_sum() >= 0.01);
        assert_eq!(histogram.get_sample_count(), 1);
    }

    #[test]
    fn test_guard_is_skipped_without_metrics() {
        assert!(LatencyGuard::for_endpoint(None, "predict").is_none());

        let metrics = Metrics::new().unwrap();
        drop(LatencyGuard::for_endpoint(Some(&metrics), "predict"));
        let histogram = metrics.request_latency_seconds.with_label_values(&["predict"]);
        assert_eq!(histogram.get_sample_count(), 1);
    }
}
