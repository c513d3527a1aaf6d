//! Admin-or-owner authorization for tournament mutations.

use hemamap_core::error::CoreError;
use hemamap_core::types::DbId;
use hemamap_upstream::rest::eq;
use hemamap_upstream::UpstreamClient;

use crate::error::AppError;
use crate::middleware::auth::AuthUser;
use crate::tables::TOURNAMENT_OWNERS;

/// Check that `user` may mutate the given published tournament.
///
/// Administrators pass unconditionally. Everyone else needs an ownership
/// record `(tournament_id, user_id)`; the lookup is fresh on every call,
/// nothing is cached. A lookup failure fails closed: it surfaces as an
/// authorization error, never as a bypass.
pub async fn ensure_can_edit(
    upstream: &UpstreamClient,
    user: &AuthUser,
    tournament_id: DbId,
) -> Result<(), AppError> {
    if user.is_admin {
        return Ok(());
    }

    let rows: Vec<serde_json::Value> = upstream
        .select(
            TOURNAMENT_OWNERS,
            &[
                eq("user_id", &user.user_id),
                eq("tournament_id", tournament_id),
            ],
            &user.token,
        )
        .await
        .map_err(|err| {
            tracing::warn!(
                error = %err,
                tournament_id,
                user_id = %user.user_id,
                "Ownership lookup failed; denying edit"
            );
            AppError::Core(CoreError::Forbidden(
                "Unable to verify tournament ownership".into(),
            ))
        })?;

    if rows.is_empty() {
        return Err(AppError::Core(CoreError::Forbidden(
            "You do not have permission to modify this tournament".into(),
        )));
    }
    Ok(())
}
