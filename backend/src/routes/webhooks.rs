//! Payment provider webhooks

use crate::auth::WebhookCaller;
use crate::error::{ApiError, ApiResult};
use crate::services::UserService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chirpy_shared::{WebhookRequest, USER_UPGRADED_EVENT};
use tracing::debug;

/// Create webhook routes
pub fn webhook_routes() -> Router<AppState> {
    Router::new().route("/webhooks", post(handle_webhook))
}

/// POST /api/polka/webhooks
///
/// The API key is checked by the extractor before the body is read. Events
/// other than `user.upgraded` are acknowledged and ignored, whatever their
/// `data` holds.
async fn handle_webhook(
    State(state): State<AppState>,
    _caller: WebhookCaller,
    body: Result<Json<WebhookRequest>, JsonRejection>,
) -> ApiResult<StatusCode> {
    let Json(req) = body?;

    if req.event != USER_UPGRADED_EVENT {
        debug!(event = %req.event, "Ignoring webhook event");
        return Ok(StatusCode::NO_CONTENT);
    }

    let user_id = req
        .data
        .user_id
        .ok_or_else(|| ApiError::BadRequest("Missing data.user_id".to_string()))?;

    UserService::upgrade_to_red(state.store(), user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
