//! Prometheus metrics for the PVZ service.
//!
//! Each [`Metrics`] owns its own [`Registry`], so several app instances can
//! live in one process (as integration tests do) without clashing on
//! metric registration.

use std::fmt;

use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

use crate::error::AppError;
use crate::result::AppResult;

/// HTTP and domain counters exported on `/metrics`.
#[derive(Clone)]
pub struct Metrics {
    registry: Registry,
    http_requests: IntCounterVec,
    http_response_time: HistogramVec,
    points_created: IntCounter,
    receptions_opened: IntCounter,
    products_added: IntCounter,
}

impl Metrics {
    /// Creates the metric families and registers them.
    pub fn new() -> AppResult<Self> {
        let registry = Registry::new();

        let http_requests = IntCounterVec::new(
            Opts::new("http_requests_total", "Total number of HTTP requests"),
            &["method", "endpoint"],
        )
        .map_err(metric_error)?;
        let http_response_time = HistogramVec::new(
            HistogramOpts::new("http_response_time_seconds", "Response time in seconds"),
            &["method", "endpoint"],
        )
        .map_err(metric_error)?;
        let points_created = IntCounter::new("pvz_created_total", "Total number of PVZ created")
            .map_err(metric_error)?;
        let receptions_opened = IntCounter::new(
            "order_receipts_created_total",
            "Total number of order receipts created",
        )
        .map_err(metric_error)?;
        let products_added =
            IntCounter::new("products_added_total", "Total number of products added")
                .map_err(metric_error)?;

        registry
            .register(Box::new(http_requests.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(http_response_time.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(points_created.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(receptions_opened.clone()))
            .map_err(metric_error)?;
        registry
            .register(Box::new(products_added.clone()))
            .map_err(metric_error)?;

        Ok(Self {
            registry,
            http_requests,
            http_response_time,
            points_created,
            receptions_opened,
            products_added,
        })
    }

    /// Counts an incoming request.
    pub fn request_started(&self, method: &str, endpoint: &str) {
        self.http_requests
            .with_label_values(&[method, endpoint])
            .inc();
    }

    /// Records how long a request took to answer.
    pub fn request_finished(&self, method: &str, endpoint: &str, seconds: f64) {
        self.http_response_time
            .with_label_values(&[method, endpoint])
            .observe(seconds);
    }

    pub fn point_created(&self) {
        self.points_created.inc();
    }

    pub fn reception_opened(&self) {
        self.receptions_opened.inc();
    }

    pub fn product_added(&self) {
        self.products_added.inc();
    }

    /// Renders every registered family in the Prometheus text format.
    pub fn encode(&self) -> AppResult<String> {
        let mut buffer = Vec::new();
        TextEncoder::new()
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(metric_error)?;
        String::from_utf8(buffer)
            .map_err(|e| AppError::internal(format!("Metrics output is not UTF-8: {e}")))
    }

    /// `Content-Type` of [`Metrics::encode`] output.
    pub fn content_type() -> &'static str {
        prometheus::TEXT_FORMAT
    }
}

impl fmt::Debug for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Metrics")
            .field("points_created", &self.points_created.get())
            .field("receptions_opened", &self.receptions_opened.get())
            .field("products_added", &self.products_added.get())
            .finish_non_exhaustive()
    }
}

fn metric_error(err: prometheus::Error) -> AppError {
    AppError::internal(format!("Metrics error: {err}"))
}
