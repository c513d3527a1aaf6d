//! Tournament submission: staging new proposals for moderation.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use hemamap_core::error::CoreError;
use hemamap_core::tournament::{StagedTournament, StagedTournamentRecord, TournamentDraft};
use hemamap_core::types::DbId;
use hemamap_upstream::rest::eq;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tables::STAGED_TOURNAMENTS;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    pub id: DbId,
}

/// POST /tournaments/submit
///
/// Stage a tournament proposal for review. The row lands in the staging
/// table attributed to the submitting user; publication only happens once
/// an administrator approves it.
pub async fn submit_tournament(
    user: AuthUser,
    State(state): State<AppState>,
    Json(draft): Json<TournamentDraft>,
) -> AppResult<impl IntoResponse> {
    if draft.trimmed_name().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Tournament name is required".into(),
        )));
    }

    let upstream = state.upstream()?;
    let staged = draft.into_staged_record(user.user_id.clone(), user.email.clone());
    let name = staged.name.clone();
    let submitted_by = staged.submitted_by.clone();

    let row = upstream
        .insert_returning(STAGED_TOURNAMENTS, &staged, &user.token)
        .await?;

    let id = row
        .get("id")
        .and_then(|v| v.as_i64())
        .ok_or_else(|| AppError::InternalError("Staged row missing id".into()))?;

    tracing::info!(staged_id = id, user_id = %user.user_id, name, "Tournament submitted");

    // Moderator heads-up is best-effort; the submission already succeeded.
    if let Some(notifier) = &state.notifier {
        if let Err(err) = notifier
            .submission_received(&name, submitted_by.as_deref())
            .await
        {
            tracing::warn!(error = %err, "Failed to send submission notification");
        }
    }

    Ok(Json(DataResponse {
        data: SubmissionReceipt { id },
    }))
}

/// GET /tournaments/staged
///
/// List the calling user's own pending submissions.
pub async fn list_staged(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;

    let records: Vec<StagedTournamentRecord> = upstream
        .select(
            STAGED_TOURNAMENTS,
            &[eq("user_id", &user.user_id)],
            &user.token,
        )
        .await?;

    let staged: Vec<StagedTournament> = records
        .into_iter()
        .map(StagedTournament::from_record)
        .collect();

    Ok(Json(DataResponse { data: staged }))
}
