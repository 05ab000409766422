//! Image upload and retrieval, proxied through the API in front of the
//! S3-compatible bucket.

use axum::{
    Json,
    extract::{Multipart, Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use crate::AppState;
use crate::error::{ApiError, Result};
use crate::handlers::response::ApiResponse;
use crate::services::storage_service::content_type_for;

const ALLOWED_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024; // 5 MiB

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub image_url: String,
    pub file_name: String,
    pub file_size: usize,
    pub mime_type: String,
}

/// Accept a multipart `file` field and store it in the bucket
#[utoipa::path(
    post,
    path = "/s3/image",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Image uploaded successfully", body = UploadedImage),
        (status = 400, description = "Missing file, wrong type or over the size limit"),
        (status = 502, description = "Object storage unavailable")
    ),
    tag = "storage"
)]
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<UploadedImage>>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to parse multipart body: {}", e)))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let original_name = field.file_name().unwrap_or("upload").to_string();
        let mime_type = field
            .content_type()
            .map(|m| m.to_string())
            .unwrap_or_default();

        if !ALLOWED_MIME_TYPES.contains(&mime_type.as_str()) {
            return Err(ApiError::BadRequest(
                "Only image files are allowed".to_string(),
            ));
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;

        if data.len() > MAX_FILE_SIZE {
            return Err(ApiError::BadRequest(
                "File size must be less than 5MB".to_string(),
            ));
        }

        let extension = original_name
            .rsplit('.')
            .next()
            .filter(|ext| !ext.is_empty() && *ext != original_name)
            .unwrap_or("jpg")
            .to_ascii_lowercase();

        let file_size = data.len();
        let file_name = state
            .storage_service
            .upload_image(data.to_vec(), &mime_type, &extension)
            .await?;

        info!(file_name = %file_name, size = file_size, "Image uploaded");

        let image_url = format!("{}/s3/images/{}", state.config.public_base_url, file_name);

        return Ok(Json(ApiResponse::success_with_message(
            UploadedImage {
                image_url,
                file_name: original_name,
                file_size,
                mime_type,
            },
            "Image uploaded successfully",
        )));
    }

    Err(ApiError::BadRequest("No file uploaded".to_string()))
}

/// Stream a stored image back through the API
#[utoipa::path(
    get,
    path = "/s3/images/{file_name}",
    params(("file_name" = String, Path, description = "Stored file name")),
    responses(
        (status = 200, description = "Image bytes"),
        (status = 404, description = "Image not found")
    ),
    tag = "storage"
)]
pub async fn get_image(
    State(state): State<AppState>,
    Path(file_name): Path<String>,
) -> Result<Response> {
    // Object keys are server-generated; refuse anything path-like
    if file_name.contains('/') || file_name.contains("..") {
        return Err(ApiError::not_found("Image"));
    }

    let bytes = state.storage_service.get_image(&file_name).await?;
    let content_type = content_type_for(&file_name);

    Ok((
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename={}", file_name),
            ),
        ],
        bytes,
    )
        .into_response())
}
