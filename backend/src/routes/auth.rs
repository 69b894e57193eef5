//! Account and session routes
//!
//! Registration, credential updates, login, refresh and revoke. Refresh and
//! revoke take the opaque refresh token as their bearer.

use crate::auth::{AuthUser, BearerToken};
use crate::error::ApiResult;
use crate::services::{SessionService, UserService};
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use chirpy_shared::{CredentialsRequest, SessionResult, TokenResponse, UserResponse};

/// Create account and session routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/users", post(register).put(update_credentials))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/revoke", post(revoke))
}

/// POST /api/users
async fn register(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let Json(req) = body?;
    let user = UserService::register(state.store(), &req.email, &req.password).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// PUT /api/users
///
/// The access token's subject is the account updated.
async fn update_credentials(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<UserResponse>> {
    let Json(req) = body?;
    let user =
        SessionService::update_credentials(state.store(), auth.user_id, &req.email, &req.password)
            .await?;
    Ok(Json(user))
}

/// POST /api/login
async fn login(
    State(state): State<AppState>,
    body: Result<Json<CredentialsRequest>, JsonRejection>,
) -> ApiResult<Json<SessionResult>> {
    let Json(req) = body?;
    let session = SessionService::login(
        state.store(),
        state.jwt(),
        state.refresh_tokens(),
        &req.email,
        &req.password,
    )
    .await?;
    Ok(Json(session))
}

/// POST /api/refresh
async fn refresh(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> ApiResult<Json<TokenResponse>> {
    let token = SessionService::refresh(
        state.store(),
        state.jwt(),
        state.refresh_tokens(),
        &refresh_token,
    )
    .await?;
    Ok(Json(TokenResponse { token }))
}

/// POST /api/revoke
async fn revoke(
    State(state): State<AppState>,
    BearerToken(refresh_token): BearerToken,
) -> ApiResult<StatusCode> {
    SessionService::revoke(state.store(), state.refresh_tokens(), &refresh_token).await?;
    Ok(StatusCode::NO_CONTENT)
}
