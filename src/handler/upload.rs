use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Multipart},
    response::IntoResponse,
    routing::post,
    Extension, Json, Router,
};
use serde::Serialize;

use crate::{
    error::HttpError,
    service::upload_service::{MAX_FILE_SIZE_BYTES, MAX_UPLOAD_FILES},
    AppState,
};

// Room for a full batch of files plus multipart framing; anything bigger is
// rejected before it is buffered.
const MAX_BODY_SIZE: usize = MAX_UPLOAD_FILES * MAX_FILE_SIZE_BYTES + 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    pub status: String,
    pub urls: Vec<String>,
}

pub fn upload_handler() -> Router {
    Router::new()
        .route("/images", post(upload_images))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
}

pub async fn upload_images(
    Extension(app_state): Extension<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, HttpError> {
    let mut urls = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::bad_request(e.to_string()))?
    {
        if urls.len() >= MAX_UPLOAD_FILES {
            return Err(HttpError::bad_request(format!(
                "At most {} files can be uploaded at once",
                MAX_UPLOAD_FILES
            )));
        }

        let file_name = field
            .file_name()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "upload.jpg".to_string());
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "application/octet-stream".to_string());

        let bytes = field
            .bytes()
            .await
            .map_err(|e| HttpError::bad_request(e.to_string()))?;

        let url = app_state
            .upload_service
            .store_image(&file_name, &content_type, bytes.to_vec())
            .await?;

        urls.push(url);
    }

    if urls.is_empty() {
        return Err(HttpError::bad_request(
            "No files were provided".to_string(),
        ));
    }

    Ok(Json(UploadResponseDto {
        status: "success".to_string(),
        urls,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_limit_fits_a_full_batch() {
        // Five files at the per-file maximum must clear the request body
        // cap, otherwise the per-file check can never be reached.
        assert!(MAX_BODY_SIZE > MAX_UPLOAD_FILES * MAX_FILE_SIZE_BYTES);
    }
}
