//! Image upload route handler.
//!
//! Accepts one multipart image part, stores it under the configured
//! upload directory with a generated name, and returns the public path.
//! The stored name never derives from client input beyond the extension,
//! which is checked against an allow-list.

use std::path::Path as FsPath;

use axum::{
    Json, Router,
    extract::{Multipart, State},
    routing::post,
};
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::state::AppState;

/// Extensions accepted for uploaded images.
const ALLOWED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif", "svg"];

/// Build the upload router.
pub fn router() -> Router<AppState> {
    Router::new().route("/upload", post(upload))
}

/// Upload response body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    /// Public path the frontend stores in `imageUrl` fields.
    pub file_path: String,
}

/// Store an uploaded image and return its public path.
///
/// # Errors
///
/// Returns 400 when no image part is present or the extension is not
/// allowed, 401 without a valid token, 500 if the file cannot be
/// written.
#[instrument(skip(admin, state, multipart))]
pub async fn upload(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let field = loop {
        let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(e.to_string()))?
        else {
            return Err(AppError::Validation("No image file provided".to_string()));
        };

        if field.name() == Some("image") {
            break field;
        }
    };

    let original_name = field
        .file_name()
        .ok_or_else(|| AppError::Validation("Image part has no file name".to_string()))?;
    let extension = allowed_extension(original_name)?;

    let stored_name = format!("{}.{extension}", Uuid::new_v4());

    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let dir = &state.config().upload_dir;
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to create upload directory: {e}")))?;
    tokio::fs::write(dir.join(&stored_name), &bytes)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to store upload: {e}")))?;

    tracing::info!(name = %stored_name, size = bytes.len(), "Stored uploaded image");

    Ok(Json(UploadResponse {
        file_path: format!("/uploads/{stored_name}"),
    }))
}

/// Validate and normalize the extension of an uploaded file name.
fn allowed_extension(file_name: &str) -> Result<String, AppError> {
    let extension = FsPath::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .ok_or_else(|| AppError::Validation("Image file has no extension".to_string()))?;

    if ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        Ok(extension)
    } else {
        Err(AppError::Validation(format!(
            "Unsupported file type '.{extension}'; allowed: png, jpg, jpeg, webp, gif, svg"
        )))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extension_accepts_common_images() {
        for name in ["photo.png", "photo.jpg", "photo.JPEG", "icon.svg", "anim.gif"] {
            assert!(allowed_extension(name).is_ok(), "{name} should be allowed");
        }
    }

    #[test]
    fn test_allowed_extension_is_lowercased() {
        assert_eq!(allowed_extension("PHOTO.PNG").unwrap(), "png");
    }

    #[test]
    fn test_allowed_extension_rejects_executables() {
        for name in ["payload.exe", "script.sh", "page.html", "noext"] {
            assert!(allowed_extension(name).is_err(), "{name} should be rejected");
        }
    }
}
