use axum::routing::get;
use axum::Router;

use crate::handlers::user;
use crate::state::AppState;

/// Per-user routes (all require authentication).
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/user/favorites",
            get(user::get_favorites).post(user::toggle_favorite),
        )
        .route("/user/owned-tournaments", get(user::owned_tournaments))
}
