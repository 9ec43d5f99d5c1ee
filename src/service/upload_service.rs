use uuid::Uuid;

use crate::{config::Config, service::error::ServiceError};

pub const MAX_UPLOAD_FILES: usize = 5;
pub const MAX_FILE_SIZE_BYTES: usize = 5 * 1024 * 1024;

/// Pushes image bytes to the object store over its HTTP API and returns the
/// public URL of the stored object.
#[derive(Clone)]
pub struct UploadService {
    base_url: String,
    bucket: String,
    api_key: String,
    client: reqwest::Client,
}

impl UploadService {
    pub fn new(config: &Config) -> Self {
        Self {
            base_url: config.storage_base_url.clone(),
            bucket: config.storage_bucket.clone(),
            api_key: config.storage_api_key.clone(),
            client: reqwest::Client::new(),
        }
    }

    pub async fn store_image(
        &self,
        file_name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, ServiceError> {
        if !content_type.starts_with("image/") {
            return Err(ServiceError::Validation(format!(
                "Only image uploads are allowed, got {}",
                content_type
            )));
        }

        if bytes.len() > MAX_FILE_SIZE_BYTES {
            return Err(ServiceError::Validation(format!(
                "File {} exceeds the 5MB upload limit",
                file_name
            )));
        }

        let extension = file_name.rsplit('.').next().unwrap_or("jpg");
        let object_key = format!("vehicles/{}.{}", Uuid::new_v4(), extension);
        let url = format!("{}/{}/{}", self.base_url, self.bucket, object_key);

        let response = self
            .client
            .put(&url)
            .bearer_auth(&self.api_key)
            .header("Content-Type", content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|e| ServiceError::Other(format!("Storage upload failed: {}", e)))?;

        if response.status().is_success() {
            tracing::info!(object_key = %object_key, "image stored");
            Ok(url)
        } else {
            let status = response.status();
            Err(ServiceError::Other(format!(
                "Storage API error ({})",
                status.as_u16()
            )))
        }
    }
}
