//! Auth-provider proxy calls (`/auth/v1`).
//!
//! Login and signup are pass-through credential exchanges: the server
//! forwards email + password to the provider and relays the issued bearer
//! token. Only the service `apikey` authenticates these calls -- there is
//! no bearer token yet.

use serde::Deserialize;
use serde_json::json;

use crate::{UpstreamClient, UpstreamError};

/// User info embedded in an auth-provider session response.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserInfo {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Response shape shared by the provider's token and signup endpoints.
///
/// A password grant returns `access_token` + `user`. Signup returns either
/// the same (auto-confirmed deployments) or a bare user object with an
/// `id` but no token, meaning a confirmation email was sent first.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user: Option<AuthUserInfo>,
    /// Set on confirmation-pending signup responses.
    #[serde(default)]
    pub id: Option<String>,
}

impl AuthSession {
    /// True when signup succeeded but the account still needs email
    /// confirmation before a token can be issued.
    pub fn requires_confirmation(&self) -> bool {
        self.access_token.is_none() && self.id.is_some()
    }
}

impl UpstreamClient {
    /// Exchange email + password for a bearer token.
    pub async fn password_grant(
        &self,
        email: &str,
        password: &str,
    ) -> Result<AuthSession, UpstreamError> {
        let request = self
            .http()
            .post(format!(
                "{}/auth/v1/token?grant_type=password",
                self.base_url()
            ))
            .header("apikey", self.service_key())
            .json(&json!({ "email": email, "password": password }));

        Self::parse_response(request.send().await?).await
    }

    /// Register a new account with the auth provider.
    pub async fn sign_up(&self, email: &str, password: &str) -> Result<AuthSession, UpstreamError> {
        let request = self
            .http()
            .post(format!("{}/auth/v1/signup", self.base_url()))
            .header("apikey", self.service_key())
            .json(&json!({ "email": email, "password": password }));

        Self::parse_response(request.send().await?).await
    }
}
