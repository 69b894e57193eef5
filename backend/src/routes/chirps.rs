//! Chirp API routes

use crate::auth::AuthUser;
use crate::error::ApiResult;
use crate::services::ChirpService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use chirpy_shared::{ChirpListQuery, ChirpResponse, CreateChirpRequest};
use uuid::Uuid;

/// Create chirp routes
pub fn chirp_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_chirps).post(create_chirp))
        .route("/:chirp_id", get(get_chirp).delete(delete_chirp))
}

/// POST /api/chirps
async fn create_chirp(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<CreateChirpRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ChirpResponse>)> {
    let Json(req) = body?;
    let chirp = ChirpService::create(state.store(), auth.user_id, &req.body).await?;
    Ok((StatusCode::CREATED, Json(chirp)))
}

/// GET /api/chirps?author_id=<uuid>&sort=asc|desc
async fn list_chirps(
    State(state): State<AppState>,
    Query(query): Query<ChirpListQuery>,
) -> ApiResult<Json<Vec<ChirpResponse>>> {
    let chirps = ChirpService::list(state.store(), &query).await?;
    Ok(Json(chirps))
}

/// GET /api/chirps/:chirp_id
async fn get_chirp(
    State(state): State<AppState>,
    Path(chirp_id): Path<Uuid>,
) -> ApiResult<Json<ChirpResponse>> {
    let chirp = ChirpService::get(state.store(), chirp_id).await?;
    Ok(Json(chirp))
}

/// DELETE /api/chirps/:chirp_id
///
/// Only the author may delete a chirp.
async fn delete_chirp(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(chirp_id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    ChirpService::delete(state.store(), auth.user_id, chirp_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
