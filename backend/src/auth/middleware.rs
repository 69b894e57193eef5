//! Axum extractors for authenticated requests
//!
//! Each extractor reads only the request head, so handlers that also take a
//! JSON body reject bad credentials before the body is parsed.

use super::gate;
use crate::error::ApiError;
use crate::state::AppState;
use axum::{extract::FromRef, http::request::Parts};
use uuid::Uuid;

/// Caller identified by a valid bearer access token
#[derive(Debug, Clone, Copy)]
pub struct AuthUser {
    pub user_id: Uuid,
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let user_id = gate::authenticate(&parts.headers, app_state.jwt())?;
        Ok(AuthUser { user_id })
    }
}

/// Raw bearer token, not interpreted
///
/// Used where the bearer is an opaque refresh token rather than a JWT.
#[derive(Clone)]
pub struct BearerToken(pub String);

impl std::fmt::Debug for BearerToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("BearerToken(<redacted>)")
    }
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = gate::extract_bearer(&parts.headers)?;
        Ok(BearerToken(token.to_string()))
    }
}

/// Payment provider presenting the configured webhook API key
#[derive(Debug, Clone, Copy)]
pub struct WebhookCaller;

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for WebhookCaller
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        app_state.webhook_key().verify(&parts.headers)?;
        Ok(WebhookCaller)
    }
}
