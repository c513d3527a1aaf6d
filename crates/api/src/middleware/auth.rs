//! Bearer-token authentication extractor for Axum handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hemamap_core::error::CoreError;
use hemamap_core::types::UserId;

use crate::auth::claims::decode_claims;
use crate::error::AppError;

/// Authenticated user extracted from a bearer token in the `Authorization`
/// header.
///
/// The token payload is decoded without signature verification (see
/// [`crate::auth::claims`]); the raw token is kept so handlers can forward
/// it to the data layer, where the real authorization happens.
///
/// Use this as an extractor parameter in any handler that requires
/// authentication:
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = %user.user_id, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The auth provider's subject id for this user.
    pub user_id: UserId,
    /// The account email claim, when present.
    pub email: Option<String>,
    /// Whether the token carries the administrator role.
    pub is_admin: bool,
    /// The raw bearer token, forwarded verbatim on data-layer calls.
    pub token: String,
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = decode_claims(token)
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid token".into())))?;

        let user_id = claims
            .sub
            .clone()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized("Invalid token".into())))?;

        Ok(AuthUser {
            user_id,
            email: claims.email.clone(),
            is_admin: claims.is_admin(),
            token: token.to_string(),
        })
    }
}
