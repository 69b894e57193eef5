//! Admin endpoints: Prometheus scrape

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::{extract::State, http::header, response::IntoResponse};

/// GET /admin/metrics
///
/// 404 when the process was started without a Prometheus recorder.
pub async fn render_metrics(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let handle = state
        .metrics()
        .ok_or_else(|| ApiError::NotFound("Metrics exporter not enabled".to_string()))?;

    Ok((
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        handle.render(),
    ))
}
