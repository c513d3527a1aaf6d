use std::sync::Arc;

use hemamap_upstream::UpstreamClient;

use crate::config::ServerConfig;
use crate::error::AppError;
use crate::notifications::email::EmailNotifier;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
/// There is no other in-process shared mutable state: every handler opens
/// fresh calls to the hosted backend and returns.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Shared HTTP client for all upstream calls (connection pooling).
    pub http: reqwest::Client,
    /// Best-effort email notifier; `None` when SMTP is not configured.
    pub notifier: Option<Arc<EmailNotifier>>,
}

impl AppState {
    pub fn new(config: ServerConfig, notifier: Option<EmailNotifier>) -> Self {
        Self {
            config: Arc::new(config),
            http: reqwest::Client::new(),
            notifier: notifier.map(Arc::new),
        }
    }

    /// Build an upstream client for this request.
    ///
    /// Missing backend configuration surfaces here as a sanitized 500; the
    /// missing variable name goes to the server log only.
    pub fn upstream(&self) -> Result<UpstreamClient, AppError> {
        let base_url = self
            .config
            .upstream
            .base_url
            .as_ref()
            .ok_or(AppError::Configuration("API_BASE_URL"))?;
        let service_key = self
            .config
            .upstream
            .service_key
            .as_ref()
            .ok_or(AppError::Configuration("API_KEY"))?;

        Ok(UpstreamClient::new(
            self.http.clone(),
            base_url.clone(),
            service_key.clone(),
        ))
    }
}
