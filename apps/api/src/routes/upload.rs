//! Image upload route.
//!
//! `POST /api/upload` takes one multipart file in the `image` field, stores
//! it under the uploads directory as `image-<uuid>.<ext>` and answers with
//! the reference products use: `/uploads/<file>`.

use axum::extract::multipart::{Multipart, MultipartRejection};
use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::{debug, info};
use uuid::Uuid;

use storefront_core::{UploadedImage, IMAGE_UPLOAD_FIELD};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Accepted file extensions and the content type each must carry.
const IMAGE_TYPES: [(&str, &str); 4] = [
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("png", "image/png"),
    ("webp", "image/webp"),
];

pub fn router() -> Router<AppState> {
    Router::new().route("/api/upload", post(upload_image))
}

/// Returns the stored extension for an upload, or rejects it.
fn image_extension(
    file_name: Option<&str>,
    content_type: Option<&str>,
) -> ApiResult<&'static str> {
    let extension = file_name
        .and_then(|name| name.rsplit_once('.'))
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    let (stored, mime) = IMAGE_TYPES
        .iter()
        .find(|(ext, _)| *ext == extension)
        .copied()
        .ok_or_else(|| ApiError::bad_request("Images only"))?;

    match content_type {
        Some(actual) if !actual.eq_ignore_ascii_case(mime) => {
            Err(ApiError::bad_request("Images only"))
        }
        _ => Ok(stored),
    }
}

/// POST /api/upload
async fn upload_image(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> ApiResult<Json<UploadedImage>> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(IMAGE_UPLOAD_FIELD) {
            debug!(field = ?field.name(), "Skipping non-image field");
            continue;
        }

        let extension = image_extension(field.file_name(), field.content_type())?;
        let bytes = field.bytes().await?;
        if bytes.is_empty() {
            return Err(ApiError::bad_request("No image file provided"));
        }

        let file_name = format!("image-{}.{}", Uuid::new_v4().simple(), extension);
        tokio::fs::create_dir_all(state.uploads_dir()).await?;
        tokio::fs::write(state.upload_path(&file_name), &bytes).await?;

        info!(file = %file_name, bytes = bytes.len(), "Image stored");
        return Ok(Json(UploadedImage {
            message: "Image uploaded successfully".to_string(),
            image: format!("/uploads/{file_name}"),
        }));
    }

    Err(ApiError::bad_request("No image file provided"))
}
