//! Per-user resources: favorites and owned tournaments.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use hemamap_core::error::CoreError;
use hemamap_core::types::DbId;
use hemamap_upstream::rest::{eq, select_columns};
use hemamap_upstream::UpstreamClient;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::tables::{TOURNAMENT_OWNERS, USER_FAVOURITES};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteToggleRequest {
    pub tournament_id: DbId,
    pub action: FavoriteAction,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteAction {
    Add,
    Remove,
}

/// The caller's complete favorites set, returned after every read or
/// mutation so the client never has to reconcile deltas.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteSet {
    pub favourite_tournament_ids: Vec<DbId>,
}

#[derive(Debug, Deserialize)]
struct FavoriteRow {
    tournament: DbId,
}

async fn fetch_favorite_ids(
    upstream: &UpstreamClient,
    user: &AuthUser,
) -> AppResult<Vec<DbId>> {
    let rows: Vec<FavoriteRow> = upstream
        .select(
            USER_FAVOURITES,
            &[eq("user_id", &user.user_id), select_columns("tournament")],
            &user.token,
        )
        .await?;
    Ok(rows.into_iter().map(|r| r.tournament).collect())
}

/// GET /user/favorites
pub async fn get_favorites(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;
    let ids = fetch_favorite_ids(&upstream, &user).await?;

    Ok(Json(DataResponse {
        data: FavoriteSet {
            favourite_tournament_ids: ids,
        },
    }))
}

/// POST /user/favorites
///
/// Add or remove a favorite. Adding an existing favorite conflicts (the
/// data layer enforces uniqueness); removing an absent one is a no-op.
pub async fn toggle_favorite(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<FavoriteToggleRequest>,
) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;

    match input.action {
        FavoriteAction::Add => {
            let row = json!({ "user_id": user.user_id, "tournament": input.tournament_id });
            upstream
                .insert(USER_FAVOURITES, &row, &user.token)
                .await
                .map_err(|err| {
                    if err.status() == Some(409) {
                        AppError::Core(CoreError::Conflict(
                            "Tournament already in favorites".into(),
                        ))
                    } else {
                        AppError::Upstream(err)
                    }
                })?;
        }
        FavoriteAction::Remove => {
            upstream
                .delete(
                    USER_FAVOURITES,
                    &[
                        eq("user_id", &user.user_id),
                        eq("tournament", input.tournament_id),
                    ],
                    &user.token,
                )
                .await?;
        }
    }

    tracing::debug!(
        user_id = %user.user_id,
        tournament_id = input.tournament_id,
        action = ?input.action,
        "Favorite toggled"
    );

    let ids = fetch_favorite_ids(&upstream, &user).await?;
    Ok(Json(DataResponse {
        data: FavoriteSet {
            favourite_tournament_ids: ids,
        },
    }))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnedSet {
    pub owned_tournament_ids: Vec<DbId>,
}

#[derive(Debug, Deserialize)]
struct OwnerRow {
    tournament_id: DbId,
}

/// GET /user/owned-tournaments
pub async fn owned_tournaments(
    user: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let upstream = state.upstream()?;

    let rows: Vec<OwnerRow> = upstream
        .select(
            TOURNAMENT_OWNERS,
            &[
                eq("user_id", &user.user_id),
                select_columns("tournament_id"),
            ],
            &user.token,
        )
        .await?;

    Ok(Json(DataResponse {
        data: OwnedSet {
            owned_tournament_ids: rows.into_iter().map(|r| r.tournament_id).collect(),
        },
    }))
}
