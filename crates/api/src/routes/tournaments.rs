use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{moderation, submission, tournaments, updates};
use crate::state::AppState;

/// Tournament routes: public listing and detail, the submission workflow,
/// moderation, edits and update feeds.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/tournaments", get(tournaments::list_tournaments))
        .route("/tournaments/submit", post(submission::submit_tournament))
        .route("/tournaments/staged", get(submission::list_staged))
        .route("/tournaments/approve", post(moderation::approve_tournament))
        .route(
            "/tournaments/{id}",
            get(tournaments::get_tournament).patch(tournaments::update_tournament),
        )
        .route(
            "/tournaments/{id}/updates",
            get(updates::list_updates).post(updates::append_update),
        )
}
