//! # Prometheus Metrics — Exposition for Container Orchestration
//!
//! Exposes edusite operational metrics in the Prometheus text exposition
//! format for scraping by Prometheus, Grafana Agent, or any
//! OpenMetrics-compatible collector.
//!
//! ## Metrics Exposed
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `edusite_http_request_duration_seconds` | Histogram | `method`, `path` | Request latency per normalized route |
//! | `edusite_uploads_total` | Counter | `outcome` | Media relay attempts by outcome |
//! | `edusite_db_pool_active` | Gauge | — | Checked-out store connections |
//! | `edusite_db_pool_idle` | Gauge | — | Idle store connections |
//!
//! Gauges are updated from the server's 30-second background loop; the
//! histogram is observed per request by the tracing middleware. The
//! `/metrics` endpoint renders the registry state on each scrape.

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::metrics::gauge::Gauge;
use prometheus_client::metrics::histogram::{exponential_buckets, Histogram};
use prometheus_client::registry::Registry;

/// Label set for per-route request metrics. `path` is normalized to collapse
/// numeric IDs, keeping label cardinality bounded.
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct HttpLabel {
    pub method: String,
    pub path: String,
}

/// Label set for media relay outcomes ("ok", "oversize", "type", "timeout",
/// "upstream").
#[derive(Clone, Debug, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct UploadLabel {
    pub outcome: String,
}

/// Thread-safe metrics registry for the edusite backend.
pub struct Metrics {
    pub registry: Registry,
    pub http_request_duration: Family<HttpLabel, Histogram>,
    pub uploads_total: Family<UploadLabel, Counter>,
    pub db_pool_active: Gauge,
    pub db_pool_idle: Gauge,
}

impl Metrics {
    /// Create a new metrics registry with all edusite metrics registered.
    pub fn new() -> Self {
        let mut registry = Registry::default();

        let http_request_duration = Family::<HttpLabel, Histogram>::new_with_constructor(|| {
            Histogram::new(exponential_buckets(0.005, 2.0, 12))
        });
        registry.register(
            "edusite_http_request_duration_seconds",
            "HTTP request latency by method and normalized path",
            http_request_duration.clone(),
        );

        let uploads_total = Family::<UploadLabel, Counter>::default();
        registry.register(
            "edusite_uploads",
            "Media relay attempts by outcome",
            uploads_total.clone(),
        );

        let db_pool_active = Gauge::default();
        registry.register(
            "edusite_db_pool_active",
            "Checked-out store connections",
            db_pool_active.clone(),
        );

        let db_pool_idle = Gauge::default();
        registry.register(
            "edusite_db_pool_idle",
            "Idle store connections",
            db_pool_idle.clone(),
        );

        Self {
            registry,
            http_request_duration,
            uploads_total,
            db_pool_active,
            db_pool_idle,
        }
    }

    /// Render all metrics in Prometheus text exposition format.
    pub fn encode(&self) -> String {
        let mut buf = String::new();
        encode(&mut buf, &self.registry).expect("encoding metrics should not fail");
        buf
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn metrics_encode_returns_valid_text() {
        let m = Metrics::new();
        m.db_pool_active.set(3);
        m.uploads_total
            .get_or_create(&UploadLabel { outcome: "ok".to_string() })
            .inc();
        let output = m.encode();
        assert!(output.contains("edusite_db_pool_active"));
        assert!(output.contains("edusite_uploads"));
        assert!(output.contains("ok"));
    }

    #[test]
    fn request_histogram_observes_per_route() {
        let m = Metrics::new();
        m.http_request_duration
            .get_or_create(&HttpLabel {
                method: "GET".to_string(),
                path: "/api/content/team".to_string(),
            })
            .observe(0.012);
        let output = m.encode();
        assert!(output.contains("edusite_http_request_duration_seconds"));
        assert!(output.contains("/api/content/team"));
    }
}
