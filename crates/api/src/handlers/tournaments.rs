//! Handlers for the published-tournament surfaces (list, detail, edit).

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use hemamap_core::error::CoreError;
use hemamap_core::tournament::{Tournament, TournamentPatch, TournamentRecord};
use hemamap_core::types::DbId;
use hemamap_core::update::{latest_per_tournament, UpdateRecord};
use hemamap_upstream::rest::{eq, order_desc};

use crate::auth::ownership::ensure_can_edit;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tables::{TOURNAMENTS, TOURNAMENT_UPDATES};

/// GET /tournaments
///
/// Public listing of all published tournaments, each with its newest
/// update attached. Reads use the service key as bearer (anonymous read).
pub async fn list_tournaments(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;
    let bearer = upstream.service_key().to_string();

    let records: Vec<TournamentRecord> = upstream.select(TOURNAMENTS, &[], &bearer).await?;

    // Attaching the latest updates is best-effort: a failure here degrades
    // the listing instead of breaking it.
    let mut latest = match upstream
        .select::<UpdateRecord>(TOURNAMENT_UPDATES, &[order_desc("created_at")], &bearer)
        .await
    {
        Ok(updates) => latest_per_tournament(updates),
        Err(err) => {
            tracing::warn!(error = %err, "Failed to fetch tournament updates for listing");
            Default::default()
        }
    };

    let tournaments: Vec<Tournament> = records
        .into_iter()
        .map(|rec| {
            let update = latest.remove(&rec.id);
            Tournament::from_record(rec).with_latest_update(update)
        })
        .collect();

    tracing::debug!(count = tournaments.len(), "Listed tournaments");
    Ok(Json(DataResponse { data: tournaments }))
}

/// GET /tournaments/{id}
///
/// Public single-tournament detail.
pub async fn get_tournament(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;
    let bearer = upstream.service_key().to_string();

    let mut rows: Vec<TournamentRecord> =
        upstream.select(TOURNAMENTS, &[eq("id", id)], &bearer).await?;

    let record = rows.pop().ok_or(AppError::Core(CoreError::NotFound {
        entity: "Tournament",
        id,
    }))?;

    Ok(Json(DataResponse {
        data: Tournament::from_record(record),
    }))
}

/// PATCH /tournaments/{id}
///
/// Partial edit of a published tournament. Requires ownership or the
/// administrator role; returns the tournament as persisted after the edit.
pub async fn update_tournament(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(patch): Json<TournamentPatch>,
) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;
    ensure_can_edit(&upstream, &user, id).await?;

    if patch.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "No fields to update".into(),
        )));
    }

    upstream
        .update(TOURNAMENTS, &[eq("id", id)], &patch.into_record_patch(), &user.token)
        .await?;

    tracing::info!(tournament_id = id, user_id = %user.user_id, "Tournament updated");

    // Re-fetch so the response reflects what was actually persisted.
    let bearer = upstream.service_key().to_string();
    let mut rows: Vec<TournamentRecord> =
        upstream.select(TOURNAMENTS, &[eq("id", id)], &bearer).await?;

    let record = rows.pop().ok_or(AppError::Core(CoreError::NotFound {
        entity: "Tournament",
        id,
    }))?;

    Ok(Json(DataResponse {
        data: Tournament::from_record(record),
    }))
}
