//! Image Upload Handler

use axum::Json;
use axum::extract::{Extension, Multipart, State};
use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::utils::{AppError, AppResult};

/// Maximum file size (5MB)
const MAX_FILE_SIZE: usize = 5 * 1024 * 1024;

/// Upload response
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub url: String,
    pub original_name: String,
    pub size: usize,
}

/// POST /api/upload
///
/// Accepts a multipart image under the field name `imagen` (or `file`),
/// validates size and content, and forwards the buffer to the image host.
pub async fn upload(
    State(state): State<ServerState>,
    Extension(user): Extension<CurrentUser>,
    mut multipart: Multipart,
) -> AppResult<Json<UploadResponse>> {
    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name != "imagen" && name != "file" {
            continue;
        }

        let content_type = field.content_type().unwrap_or_default().to_string();
        let original_name = field
            .file_name()
            .unwrap_or("imagen")
            .to_string();
        let data = field.bytes().await?;

        if data.len() > MAX_FILE_SIZE {
            return Err(AppError::validation(
                "La imagen supera el tamaño máximo de 5MB",
            ));
        }
        if !content_type.starts_with("image/") {
            return Err(AppError::validation("Solo se permiten archivos de imagen"));
        }

        // Reject buffers that do not decode as an image
        image::load_from_memory(&data)
            .map_err(|e| AppError::validation(format!("Imagen inválida: {e}")))?;

        // Content-addressed name keeps re-uploads idempotent on the host
        let hash = hex::encode(Sha256::digest(&data));
        let filename = format!("{}.jpg", &hash[..16]);

        let url = state.images.upload(data.to_vec(), &filename).await?;

        tracing::info!(
            username = %user.username,
            size = data.len(),
            "Image uploaded"
        );

        return Ok(Json(UploadResponse {
            url,
            original_name,
            size: data.len(),
        }));
    }

    Err(AppError::validation("Falta el archivo de imagen"))
}
