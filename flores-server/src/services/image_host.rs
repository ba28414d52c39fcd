//! Image-hosting client
//!
//! Entity images live on an external host; the server only forwards
//! validated buffers and stores the returned public URL. Host failures
//! surface as [`AppError::Upstream`].

use serde::Deserialize;

use crate::utils::AppError;

/// Image host configuration
#[derive(Debug, Clone)]
pub struct ImageHostConfig {
    /// Upload endpoint
    pub upload_url: String,
    /// API key sent alongside each upload
    pub api_key: String,
}

impl ImageHostConfig {
    pub fn from_env() -> Self {
        Self {
            upload_url: std::env::var("IMAGE_HOST_URL").unwrap_or_default(),
            api_key: std::env::var("IMAGE_HOST_KEY").unwrap_or_default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.upload_url.is_empty()
    }
}

/// Image-hosting service
#[derive(Debug, Clone)]
pub struct ImageHostService {
    client: reqwest::Client,
    config: ImageHostConfig,
}

#[derive(Deserialize)]
struct UploadResult {
    #[serde(default)]
    secure_url: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

impl ImageHostService {
    pub fn new(config: ImageHostConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Upload an image buffer; returns its public URL
    pub async fn upload(&self, data: Vec<u8>, filename: &str) -> Result<String, AppError> {
        if !self.config.is_configured() {
            return Err(AppError::upstream("Image host is not configured"));
        }

        let part = reqwest::multipart::Part::bytes(data)
            .file_name(filename.to_string())
            .mime_str("image/jpeg")
            .map_err(|e| AppError::internal(format!("Invalid multipart part: {e}")))?;
        let form = reqwest::multipart::Form::new()
            .part("file", part)
            .text("api_key", self.config.api_key.clone());

        let resp = self
            .client
            .post(&self.config.upload_url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Image upload failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            tracing::error!(target: "images", %status, %body, "Image host returned error");
            return Err(AppError::upstream(format!("Image host returned {status}")));
        }

        let result: UploadResult = resp
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid image host response: {e}")))?;

        result
            .secure_url
            .or(result.url)
            .ok_or_else(|| AppError::upstream("Image host returned no URL"))
    }
}
