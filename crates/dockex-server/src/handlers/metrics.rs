use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use dockex_metrics::{CONTENT_TYPE, render_prometheus};
use tracing::debug;

use crate::router::ExporterState;

/// Runs a fresh scrape against the runtime for every request.
pub async fn prometheus_metrics(State(state): State<Arc<ExporterState>>) -> impl IntoResponse {
    let records = state.collector.scrape().await;
    debug!(records = records.len(), "rendering scrape");
    let payload = render_prometheus(&records);

    let mut response = Response::new(Body::from(payload));
    *response.status_mut() = StatusCode::OK;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static(CONTENT_TYPE));

    response
}
