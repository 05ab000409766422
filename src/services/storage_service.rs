use aws_config::BehaviorVersion;
use aws_sdk_s3::Client;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::primitives::ByteStream;
use chrono::Utc;
use rand::{Rng, distributions::Alphanumeric};
use tracing::{debug, info};

use crate::config::StorageConfig;
use crate::error::{ApiError, ErrorCode, Result};

const IMAGE_FOLDER: &str = "images";

/// S3-compatible object store client (MinIO in development).
///
/// Uploaded objects are keyed `images/{unix_millis}-{suffix}.{ext}` and
/// served back through the API rather than directly from the bucket.
#[derive(Clone)]
pub struct StorageService {
    client: Client,
    bucket: String,
}

impl StorageService {
    pub async fn new(config: &StorageConfig) -> Self {
        let credentials = Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None,
            None,
            "static",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(config.endpoint.clone())
            .load()
            .await;

        // MinIO serves buckets on the path, not as subdomains
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        info!(bucket = %config.bucket, endpoint = %config.endpoint, "Storage client initialized");

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket.clone(),
        }
    }

    /// Store image bytes and return the generated file name.
    pub async fn upload_image(
        &self,
        data: Vec<u8>,
        content_type: &str,
        extension: &str,
    ) -> Result<String> {
        let suffix: String = rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(8)
            .map(char::from)
            .collect();
        let file_name = format!("{}-{}.{}", Utc::now().timestamp_millis(), suffix, extension);
        let key = format!("{}/{}", IMAGE_FOLDER, file_name);

        debug!(bucket = %self.bucket, key = %key, "Uploading object");

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| {
                ApiError::with_details(
                    ErrorCode::StorageUnavailable,
                    "Failed to upload file",
                    e.to_string(),
                )
            })?;

        Ok(file_name)
    }

    pub async fn get_image(&self, file_name: &str) -> Result<Vec<u8>> {
        let key = format!("{}/{}", IMAGE_FOLDER, file_name);

        let response = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await
            .map_err(|e| match e.into_service_error() {
                err if err.is_no_such_key() => ApiError::not_found("Image"),
                err => ApiError::with_details(
                    ErrorCode::StorageUnavailable,
                    "Failed to read file",
                    err.to_string(),
                ),
            })?;

        let bytes = response.body.collect().await.map_err(|e| {
            ApiError::with_details(
                ErrorCode::StorageUnavailable,
                "Failed to read file",
                e.to_string(),
            )
        })?;

        Ok(bytes.into_bytes().to_vec())
    }
}

/// Content type for a stored file, derived from its extension.
pub fn content_type_for(file_name: &str) -> &'static str {
    match file_name.rsplit('.').next().map(str::to_ascii_lowercase) {
        Some(ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ext) if ext == "png" => "image/png",
        Some(ext) if ext == "gif" => "image/gif",
        Some(ext) if ext == "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_lookup() {
        assert_eq!(content_type_for("a.jpg"), "image/jpeg");
        assert_eq!(content_type_for("a.JPEG"), "image/jpeg");
        assert_eq!(content_type_for("photo.webp"), "image/webp");
        assert_eq!(content_type_for("unknown.bin"), "application/octet-stream");
    }
}
