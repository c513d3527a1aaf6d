//! HTTP client for the hosted backend service.
//!
//! The tournament finder keeps no database of its own; every read and
//! write goes to a hosted backend exposing three surfaces under one base
//! URL:
//!
//! - `/rest/v1/{table}` -- the data layer (PostgREST-style row filters)
//! - `/auth/v1/...`     -- the auth provider (signup, password grant)
//! - `/storage/v1/...`  -- object storage (logo uploads)
//!
//! Every data-layer call carries two credentials: the server-held service
//! `apikey` and the caller's bearer token, which the data layer re-checks
//! against its row-level policies. This crate does no authorization of its
//! own.

pub mod auth;
pub mod error;
pub mod rest;
pub mod storage;

pub use error::UpstreamError;

/// Client handle for one hosted-backend deployment.
///
/// Cheap to construct per request: it wraps a shared [`reqwest::Client`]
/// (connection pooling) plus the base URL and service key.
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    base_url: String,
    service_key: String,
}

impl UpstreamClient {
    /// Create a client for the deployment at `base_url`.
    ///
    /// * `base_url` - e.g. `https://project.example.co` (no trailing slash).
    /// * `service_key` - the server-held `apikey` sent on every call.
    pub fn new(http: reqwest::Client, base_url: String, service_key: String) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            service_key,
        }
    }

    /// The deployment base URL (no trailing slash).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The service API key.
    ///
    /// Public reads use this as the bearer as well (the data layer treats
    /// the service key as an anonymous-read credential).
    pub fn service_key(&self) -> &str {
        &self.service_key
    }

    /// Attach the service `apikey` and a bearer token to a request.
    pub(crate) fn authed(
        &self,
        builder: reqwest::RequestBuilder,
        bearer: &str,
    ) -> reqwest::RequestBuilder {
        builder
            .header("apikey", &self.service_key)
            .bearer_auth(bearer)
    }

    /// Ensure the response has a success status code. Returns the response
    /// unchanged on success, or an [`UpstreamError::Status`] containing the
    /// status and body text on failure.
    pub(crate) async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, UpstreamError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(UpstreamError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Parse a successful JSON response body into the expected type.
    pub(crate) async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, UpstreamError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}
