//! Prometheus metrics collection for gemini-bridge
//!
//! Tracks:
//! - Chat requests by outcome
//! - Upstream `generateContent` latency by HTTP status class
//!
//! Metrics are exposed via the `/metrics` endpoint in Prometheus text format.

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Outcome of a `/api/chat` request, used as a metrics label
///
/// Restricting the label to a closed set keeps the counter's cardinality fixed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Upstream answered 2xx and the response was translated
    Success,
    /// Upstream answered non-2xx and the error was relayed
    UpstreamError,
    /// API key missing or other configuration problem
    ConfigError,
    /// Request body could not be parsed
    InvalidRequest,
    /// Transport failure, unparseable upstream body, or internal error
    InternalError,
}

impl Outcome {
    /// Convert outcome to Prometheus label string
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Success => "success",
            Outcome::UpstreamError => "upstream_error",
            Outcome::ConfigError => "config_error",
            Outcome::InvalidRequest => "invalid_request",
            Outcome::InternalError => "internal_error",
        }
    }
}

/// Metrics collector
#[derive(Clone)]
pub struct Metrics {
    pub registry: Arc<Registry>,
    chat_requests_total: IntCounterVec,
    upstream_duration: HistogramVec,
}

impl Metrics {
    /// Create a new Metrics instance
    ///
    /// Registers all metrics with a new Prometheus registry.
    ///
    /// # Errors
    ///
    /// Returns an error if metric registration fails (e.g., duplicate names).
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let chat_requests_total = IntCounterVec::new(
            Opts::new(
                "gemini_bridge_chat_requests_total",
                "Total number of /api/chat requests by outcome",
            ),
            &["outcome"],
        )?;

        // Label is the status class ("2xx", "4xx", ...) or "transport" when no
        // response arrived at all.
        let upstream_duration = HistogramVec::new(
            HistogramOpts::new(
                "gemini_bridge_upstream_duration_ms",
                "Latency of generateContent calls in milliseconds",
            )
            .buckets(vec![
                50.0, 100.0, 250.0, 500.0, 1000.0, 2500.0, 5000.0, 10000.0, 30000.0, 60000.0,
            ]),
            &["status"],
        )?;

        registry.register(Box::new(chat_requests_total.clone()))?;
        registry.register(Box::new(upstream_duration.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            chat_requests_total,
            upstream_duration,
        })
    }

    /// Record a finished chat request
    pub fn record_request(&self, outcome: Outcome) {
        self.chat_requests_total
            .with_label_values(&[outcome.as_str()])
            .inc();
    }

    /// Record the latency of one upstream call
    ///
    /// `status` is `None` when the call failed before a response arrived.
    pub fn record_upstream_duration(&self, status: Option<u16>, duration_ms: f64) {
        let label = match status {
            Some(code) => status_class(code),
            None => "transport",
        };
        self.upstream_duration
            .with_label_values(&[label])
            .observe(duration_ms);
    }

    /// Current value of the request counter for `outcome`
    pub fn requests_count(&self, outcome: Outcome) -> u64 {
        self.chat_requests_total
            .with_label_values(&[outcome.as_str()])
            .get()
    }

    /// Gather all metrics and encode them in Prometheus text format
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
    }
}

fn status_class(code: u16) -> &'static str {
    match code {
        100..=199 => "1xx",
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        _ => "5xx",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_new_registers() {
        let metrics = Metrics::new().expect("should create metrics");
        metrics.record_request(Outcome::Success);
        let output = metrics.gather().expect("should gather");
        assert!(output.contains("gemini_bridge_chat_requests_total"));
    }

    #[test]
    fn test_record_request_increments_only_its_outcome() {
        let metrics = Metrics::new().unwrap();
        metrics.record_request(Outcome::UpstreamError);
        metrics.record_request(Outcome::UpstreamError);
        metrics.record_request(Outcome::Success);

        assert_eq!(metrics.requests_count(Outcome::UpstreamError), 2);
        assert_eq!(metrics.requests_count(Outcome::Success), 1);
        assert_eq!(metrics.requests_count(Outcome::ConfigError), 0);
    }

    #[test]
    fn test_upstream_duration_labels() {
        let metrics = Metrics::new().unwrap();
        metrics.record_upstream_duration(Some(200), 120.0);
        metrics.record_upstream_duration(Some(429), 15.0);
        metrics.record_upstream_duration(None, 3.0);

        let output = metrics.gather().unwrap();
        assert!(output.contains(r#"status="2xx""#));
        assert!(output.contains(r#"status="4xx""#));
        assert!(output.contains(r#"status="transport""#));
    }

    #[test]
    fn test_outcome_labels_are_distinct() {
        let labels = [
            Outcome::Success,
            Outcome::UpstreamError,
            Outcome::ConfigError,
            Outcome::InvalidRequest,
            Outcome::InternalError,
        ]
        .map(|o| o.as_str());
        let unique: std::collections::HashSet<_> = labels.iter().collect();
        assert_eq!(unique.len(), labels.len());
    }
}
