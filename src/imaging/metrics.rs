// Image pipeline Prometheus metrics
//
// Provides:
// - Conversion counters by endpoint and outcome
// - Pipeline duration histogram by endpoint
// - Bytes read from uploads and written to responses

use prometheus::{
    register_histogram_vec, register_int_counter_vec, Encoder, Histogram, HistogramVec,
    IntCounter, IntCounterVec, TextEncoder,
};
use std::sync::OnceLock;

/// Global metrics for the conversion pipeline
pub struct PipelineMetrics {
    /// Conversions by endpoint and outcome (`ok` or an error kind)
    pub conversions: IntCounterVec,

    /// Pipeline duration histogram (in seconds)
    pub duration: HistogramVec,

    /// Upload bytes handed to the pipeline
    pub bytes_in: IntCounter,

    /// Encoded bytes produced by the pipeline
    pub bytes_out: IntCounter,

    /// Uploads rejected by the filename check, by endpoint
    pub rejections: IntCounterVec,
}

/// Global singleton instance of metrics
static METRICS: OnceLock<PipelineMetrics> = OnceLock::new();

impl PipelineMetrics {
    /// Initialize and return the global metrics instance
    pub fn global() -> &'static Self {
        METRICS.get_or_init(|| {
            let conversions = register_int_counter_vec!(
                "imgconv_conversions_total",
                "Total number of pipeline runs by endpoint and outcome",
                &["endpoint", "outcome"]
            )
            .expect("Failed to register imgconv_conversions_total metric");

            let duration = register_histogram_vec!(
                "imgconv_conversion_duration_seconds",
                "Duration of decode, transform and encode in seconds",
                &["endpoint"],
                vec![0.001, 0.005, 0.01, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0] // 1ms to 5s
            )
            .expect("Failed to register imgconv_conversion_duration_seconds metric");

            let bytes = register_int_counter_vec!(
                "imgconv_bytes_total",
                "Image bytes processed by direction",
                &["direction"] // in, out
            )
            .expect("Failed to register imgconv_bytes_total metric");

            let rejections = register_int_counter_vec!(
                "imgconv_rejected_uploads_total",
                "Uploads rejected by filename extension check",
                &["endpoint"]
            )
            .expect("Failed to register imgconv_rejected_uploads_total metric");

            PipelineMetrics {
                conversions,
                duration,
                bytes_in: bytes.with_label_values(&["in"]),
                bytes_out: bytes.with_label_values(&["out"]),
                rejections,
            }
        })
    }

    /// Start timing a pipeline run
    pub fn start_timer(&self, endpoint: &str) -> HistogramTimer {
        HistogramTimer {
            histogram: self.duration.with_label_values(&[endpoint]),
            start: std::time::Instant::now(),
        }
    }

    pub fn record_success(&self, endpoint: &str) {
        self.conversions.with_label_values(&[endpoint, "ok"]).inc();
    }

    pub fn record_failure(&self, endpoint: &str, kind: &str) {
        self.conversions.with_label_values(&[endpoint, kind]).inc();
    }

    pub fn record_rejection(&self, endpoint: &str) {
        self.rejections.with_label_values(&[endpoint]).inc();
    }

    pub fn record_bytes_in(&self, bytes: usize) {
        self.bytes_in.inc_by(bytes as u64);
    }

    pub fn record_bytes_out(&self, bytes: usize) {
        self.bytes_out.inc_by(bytes as u64);
    }
}

/// Timer for histogram metrics
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Record the elapsed time
    pub fn observe_duration(self) {
        self.histogram.observe(self.start.elapsed().as_secs_f64());
    }
}

/// Render every registered metric in the Prometheus text format
pub fn export_prometheus() -> String {
    // Make sure the pipeline metrics exist even before the first request
    PipelineMetrics::global();

    let mut buffer = Vec::new();
    let encoder = TextEncoder::new();
    if let Err(e) = encoder.encode(&prometheus::gather(), &mut buffer) {
        tracing::error!(error = %e, "failed to encode metrics");
        return String::new();
    }
    String::from_utf8(buffer).unwrap_or_default()
}
