//! Latency histogram
//!
//! Thin wrapper over HdrHistogram for percentile reporting. Values are
//! microseconds; the bounds cover one microsecond to ten minutes at three
//! significant figures, which is ample for a put round-trip.

use hdrhistogram::Histogram;

const MAX_LATENCY_US: u64 = 600_000_000;

/// Microsecond latency histogram
#[derive(Debug, Clone)]
pub struct LatencyHistogram {
    hist: Histogram<u64>,
}

impl LatencyHistogram {
    pub fn new() -> Self {
        Self {
            // Static bounds, construction cannot fail
            hist: Histogram::new_with_bounds(1, MAX_LATENCY_US, 3)
                .expect("histogram bounds are constant"),
        }
    }

    /// Record one latency sample in microseconds
    pub fn record(&mut self, latency_us: u64) {
        self.hist
            .record(latency_us.clamp(1, MAX_LATENCY_US))
            .expect("value clamped into histogram range");
    }

    /// Number of recorded samples
    pub fn len(&self) -> u64 {
        self.hist.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hist.is_empty()
    }

    /// Latency at the given quantile (0.0 to 1.0), in microseconds
    pub fn value_at_quantile(&self, quantile: f64) -> u64 {
        self.hist.value_at_quantile(quantile)
    }

    /// Merge another histogram's samples into this one
    pub fn merge(&mut self, other: &LatencyHistogram) {
        self.hist
            .add(&other.hist)
            .expect("histograms share identical bounds");
    }
}

impl Default for LatencyHistogram {
    fn default() -> Self {
        Self::new()
    }
}
