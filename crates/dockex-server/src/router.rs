use std::{sync::Arc, time::Duration};

use axum::{Router, http::StatusCode, routing::get};
use dockex_collector::DockerCollector;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::handlers;

pub const HEALTH_LIVE_PATH: &str = "/health/live";

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

pub struct ExporterState {
    pub collector: DockerCollector,
    pub telemetry_path: String,
    /// Requests still running after this are answered with 408.
    pub request_timeout: Duration,
}

impl ExporterState {
    pub fn new(collector: DockerCollector, telemetry_path: impl Into<String>) -> Self {
        Self {
            collector,
            telemetry_path: telemetry_path.into(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// The exporter's HTTP surface. The telemetry path wins if it collides with a fixed route.
pub fn exporter_router(state: Arc<ExporterState>) -> Router {
    let telemetry_path = state.telemetry_path.clone();
    let request_timeout = state.request_timeout;

    let mut router = Router::new().route(
        &telemetry_path,
        get(handlers::metrics::prometheus_metrics),
    );
    if telemetry_path != "/" {
        router = router.route("/", get(handlers::index::landing_page));
    }
    if telemetry_path != HEALTH_LIVE_PATH {
        router = router.route(HEALTH_LIVE_PATH, get(handlers::health::health_live));
    }

    router
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
