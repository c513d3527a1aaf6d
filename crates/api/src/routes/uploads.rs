use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Upload routes (require authentication).
pub fn router() -> Router<AppState> {
    Router::new().route("/upload-logo", post(uploads::upload_logo))
}
