//! Role-based access control extractor.
//!
//! Wraps [`AuthUser`] and rejects requests whose role does not meet the
//! minimum requirement. Use in route handlers to enforce authorization at
//! the type level; plain authentication uses [`AuthUser`] directly.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use hemamap_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;

/// Requires the administrator role. Rejects with 403 Forbidden otherwise.
///
/// Note this is a routing decision only: the admin claim comes from the
/// unverified token payload, and the data layer re-checks the forwarded
/// token before any privileged row is touched.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user carries the admin role here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = AuthUser::from_request_parts(parts, state).await?;
        if !user.is_admin {
            return Err(AppError::Core(CoreError::Forbidden(
                "Admin role required".into(),
            )));
        }
        Ok(RequireAdmin(user))
    }
}
