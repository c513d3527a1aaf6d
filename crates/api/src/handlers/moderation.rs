//! Moderation: approving staged submissions into the public listing.
//!
//! Approval is a multi-step pipeline without a surrounding transaction
//! (each step is a separate call to the hosted data layer), so failure
//! handling is per step: publication failure aborts, every later step
//! degrades to a warning instead of rolling back the publish.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use hemamap_core::error::CoreError;
use hemamap_core::tournament::StagedTournamentRecord;
use hemamap_core::types::DbId;
use hemamap_upstream::rest::eq;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tables::{STAGED_TOURNAMENTS, TOURNAMENTS, TOURNAMENT_OWNERS};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveRequest {
    /// Id of the staged row to approve.
    pub tournament_id: DbId,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApproveResponse {
    /// Id of the newly published tournament.
    pub id: DbId,
    /// Set when a post-publish step failed and may need manual follow-up.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// POST /tournaments/approve
///
/// Admin-only. Publishes a staged submission: copies it into the public
/// table, records ownership for the submitter, notifies them by email,
/// and marks the staged row resolved.
pub async fn approve_tournament(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<ApproveRequest>,
) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;

    // Step 1: load the staged row.
    let mut rows: Vec<StagedTournamentRecord> = upstream
        .select(
            STAGED_TOURNAMENTS,
            &[eq("id", input.tournament_id)],
            &admin.token,
        )
        .await?;
    let staged = rows.pop().ok_or(AppError::Core(CoreError::NotFound {
        entity: "Staged tournament",
        id: input.tournament_id,
    }))?;

    // Steps 2-3: publish. A failure here aborts the whole approval.
    let payload = staged.to_published_payload(Utc::now());
    let published = upstream
        .insert_returning(TOURNAMENTS, &payload, &admin.token)
        .await?;
    let new_id = published
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| AppError::InternalError("Published row missing id".into()))?;

    tracing::info!(
        staged_id = staged.id,
        tournament_id = new_id,
        admin = %admin.user_id,
        "Staged tournament published"
    );

    let mut warning = None;

    // Step 4: grant the submitter ownership of the published tournament.
    // The publish already happened, so a failure here only warns.
    if let Some(user_id) = &staged.user_id {
        let ownership = json!({ "tournament_id": new_id, "user_id": user_id });
        if let Err(err) = upstream
            .insert(TOURNAMENT_OWNERS, &ownership, &admin.token)
            .await
        {
            tracing::warn!(
                error = %err,
                tournament_id = new_id,
                user_id = %user_id,
                "Failed to record ownership for approved tournament"
            );
            warning = Some("Tournament published, but ownership could not be recorded".into());
        }
    }

    // Step 5: tell the submitter. Prefer a submitted_by that looks like an
    // email address, fall back to the listed contact address.
    let contact = staged
        .submitted_by
        .as_deref()
        .filter(|s| s.contains('@'))
        .or_else(|| (!staged.contact_email.is_empty()).then_some(staged.contact_email.as_str()));
    if let (Some(notifier), Some(to)) = (&state.notifier, contact) {
        if let Err(err) = notifier.submission_approved(to, &staged.name).await {
            tracing::warn!(error = %err, to, "Failed to send approval notification");
        }
    }

    // Step 6: mark the staged row resolved so it drops out of the queue.
    if let Err(err) = upstream
        .update(
            STAGED_TOURNAMENTS,
            &[eq("id", staged.id)],
            &json!({ "resolved": true }),
            &admin.token,
        )
        .await
    {
        tracing::warn!(error = %err, staged_id = staged.id, "Failed to mark staged row resolved");
        warning
            .get_or_insert("Tournament approved, but the staging area may need manual cleanup".into());
    }

    Ok(Json(DataResponse {
        data: ApproveResponse { id: new_id, warning },
    }))
}
