//! Login and signup proxies to the hosted auth provider.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use hemamap_core::error::CoreError;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Session info relayed back to the client. `token` is absent on signup
/// when the provider wants email confirmation first.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identity: Option<String>,
    pub requires_confirmation: bool,
}

const MIN_PASSWORD_LENGTH: usize = 6;

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Json(creds): Json<CredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    if creds.email.is_empty() || creds.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email and password are required".into(),
        )));
    }

    let upstream = state.upstream()?;

    let session = upstream
        .password_grant(&creds.email, &creds.password)
        .await
        .map_err(|err| match err.status() {
            // The provider answers bad credentials with a 4xx; relay its
            // message rather than a generic upstream failure.
            Some(status) if (400..500).contains(&status) => {
                AppError::Core(CoreError::Unauthorized(err.message()))
            }
            _ => AppError::Upstream(err),
        })?;

    let token = session.access_token.ok_or(AppError::Core(
        CoreError::Unauthorized("Login failed".into()),
    ))?;

    tracing::info!(email = %creds.email, "User logged in");

    Ok(Json(DataResponse {
        data: SessionResponse {
            token: Some(token),
            identity: session.user.and_then(|u| u.email),
            requires_confirmation: false,
        },
    }))
}

/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    Json(creds): Json<CredentialsRequest>,
) -> AppResult<impl IntoResponse> {
    if creds.email.is_empty() || creds.password.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Email and password are required".into(),
        )));
    }
    if creds.password.len() < MIN_PASSWORD_LENGTH {
        return Err(AppError::Core(CoreError::Validation(
            "Password must be at least 6 characters.".into(),
        )));
    }

    let upstream = state.upstream()?;

    let session = upstream
        .sign_up(&creds.email, &creds.password)
        .await
        .map_err(|err| match err.status() {
            Some(status) if (400..500).contains(&status) => {
                AppError::BadRequest(err.message())
            }
            _ => AppError::Upstream(err),
        })?;

    let requires_confirmation = session.requires_confirmation();
    if requires_confirmation {
        tracing::info!(email = %creds.email, "Signup pending email confirmation");
    } else {
        tracing::info!(email = %creds.email, "User signed up");
    }

    Ok(Json(DataResponse {
        data: SessionResponse {
            token: session.access_token,
            identity: session.user.and_then(|u| u.email),
            requires_confirmation,
        },
    }))
}
