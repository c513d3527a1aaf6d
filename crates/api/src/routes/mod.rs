pub mod auth;
pub mod health;
pub mod tournaments;
pub mod uploads;
pub mod user;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree (mounted at the root).
///
/// Route hierarchy:
///
/// ```text
/// /tournaments                    list published (GET, public)
/// /tournaments/submit             stage a submission (POST, auth)
/// /tournaments/staged             caller's pending submissions (GET, auth)
/// /tournaments/approve            publish a staged row (POST, admin)
/// /tournaments/{id}               detail (GET, public), edit (PATCH, owner/admin)
/// /tournaments/{id}/updates       feed (GET, public), append (POST, owner/admin)
///
/// /user/favorites                 get set (GET), toggle (POST) (auth)
/// /user/owned-tournaments         owned ids (GET, auth)
///
/// /login                          password login proxy (POST, public)
/// /signup                         registration proxy (POST, public)
///
/// /upload-logo                    logo upload (POST, auth, multipart)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(tournaments::router())
        .merge(user::router())
        .merge(auth::router())
        .merge(uploads::router())
}
