//! Application state management
//!
//! Everything a handler needs is built once at startup and shared through
//! axum's state extraction. All fields are cheap to clone.

use crate::auth::{ApiKey, JwtService, RefreshTokenService};
use crate::config::AppConfig;
use crate::store::Store;
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Persistence backend
    pub store: Arc<dyn Store>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Pre-initialized JWT service with cached keys
    pub jwt: JwtService,
    pub refresh_tokens: RefreshTokenService,
    webhook_key: ApiKey,
    metrics: Option<PrometheusHandle>,
}

impl AppState {
    /// Create a new application state
    ///
    /// Derives the JWT keys from the configured secret, so call once at
    /// startup.
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        let jwt = JwtService::new(&config.auth.secret, config.auth.access_token_ttl_secs);
        let refresh_tokens = RefreshTokenService::new(config.auth.refresh_token_ttl_days);
        let webhook_key = ApiKey::new(config.webhook.api_key.clone());

        Self {
            store,
            config: Arc::new(config),
            jwt,
            refresh_tokens,
            webhook_key,
            metrics: None,
        }
    }

    /// Attach the Prometheus handle rendered at `/admin/metrics`
    pub fn with_metrics(mut self, handle: PrometheusHandle) -> Self {
        self.metrics = Some(handle);
        self
    }

    #[inline]
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    #[inline]
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    #[inline]
    pub fn jwt(&self) -> &JwtService {
        &self.jwt
    }

    #[inline]
    pub fn refresh_tokens(&self) -> &RefreshTokenService {
        &self.refresh_tokens
    }

    #[inline]
    pub fn webhook_key(&self) -> &ApiKey {
        &self.webhook_key
    }

    #[inline]
    pub fn metrics(&self) -> Option<&PrometheusHandle> {
        self.metrics.as_ref()
    }
}
