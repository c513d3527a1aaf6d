//! Logo upload to the hosted object store.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use hemamap_core::error::CoreError;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

const ALLOWED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png"];
const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png"];

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedLogo {
    /// Public URL the stored object is served from.
    pub url: String,
    /// Generated object name within the bucket.
    pub file_name: String,
}

/// POST /upload-logo
///
/// Accepts a multipart form with a single `file` part (JPEG or PNG),
/// stores it under a generated name and returns its public URL.
pub async fn upload_logo(
    user: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let Some(bucket) = state.config.upstream.logos_bucket.clone() else {
        return Err(AppError::Configuration("LOGOS_BUCKET"));
    };
    let upstream = state.upstream()?;

    let mut file: Option<(String, String, Vec<u8>)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_lowercase();
        let content_type = field.content_type().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("Failed to read upload: {e}")))?;
        file = Some((file_name, content_type, bytes.to_vec()));
        break;
    }

    let Some((file_name, content_type, bytes)) = file else {
        return Err(AppError::BadRequest("No file provided".into()));
    };

    let extension_ok = ALLOWED_EXTENSIONS.iter().any(|ext| file_name.ends_with(ext));
    let mime_ok = ALLOWED_MIME_TYPES.contains(&content_type.as_str());
    if !extension_ok || !mime_ok {
        return Err(AppError::Core(CoreError::Validation(
            "Invalid file type. Only JPEG and PNG images are allowed.".into(),
        )));
    }

    let ext = if file_name.ends_with(".png") { ".png" } else { ".jpg" };
    let nonce = Uuid::new_v4().simple().to_string();
    let object_name = format!(
        "logo_{}_{}{ext}",
        Utc::now().timestamp_millis(),
        &nonce[..6]
    );

    upstream
        .upload_object(&bucket, &object_name, &content_type, bytes, &user.token)
        .await?;

    let url = upstream.public_object_url(&bucket, &object_name);
    tracing::info!(user_id = %user.user_id, object_name, "Logo uploaded");

    Ok(Json(DataResponse {
        data: UploadedLogo {
            url,
            file_name: object_name,
        },
    }))
}
