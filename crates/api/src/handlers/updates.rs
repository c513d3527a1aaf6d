//! Tournament update feeds (announcements).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use hemamap_core::error::CoreError;
use hemamap_core::types::DbId;
use hemamap_core::update::{TournamentUpdate, UpdateRecord};
use hemamap_upstream::rest::{eq, order_desc};
use serde::Deserialize;
use serde_json::json;

use crate::auth::ownership::ensure_can_edit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tables::TOURNAMENT_UPDATES;

/// GET /tournaments/{id}/updates
///
/// Public feed of updates for one tournament, newest first.
pub async fn list_updates(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;
    let bearer = upstream.service_key().to_string();

    let records: Vec<UpdateRecord> = upstream
        .select(
            TOURNAMENT_UPDATES,
            &[eq("tournament_id", id), order_desc("created_at")],
            &bearer,
        )
        .await?;

    let updates: Vec<TournamentUpdate> = records
        .into_iter()
        .map(TournamentUpdate::from_record)
        .collect();

    Ok(Json(DataResponse { data: updates }))
}

#[derive(Debug, Deserialize)]
pub struct AppendUpdateRequest {
    pub message: String,
}

/// POST /tournaments/{id}/updates
///
/// Append an update to a tournament's feed. Requires ownership or the
/// administrator role.
pub async fn append_update(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<AppendUpdateRequest>,
) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;
    ensure_can_edit(&upstream, &user, id).await?;

    let message = input.message.trim();
    if message.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Update message is required".into(),
        )));
    }

    let row = upstream
        .insert_returning(
            TOURNAMENT_UPDATES,
            &json!({ "tournament_id": id, "message": message }),
            &user.token,
        )
        .await?;

    let record: UpdateRecord = serde_json::from_value(row)
        .map_err(|e| AppError::InternalError(format!("Malformed update row: {e}")))?;

    tracing::info!(tournament_id = id, update_id = record.id, "Update posted");

    Ok(Json(DataResponse {
        data: TournamentUpdate::from_record(record),
    }))
}
