//! Content section route handlers.
//!
//! Reads are public; the upsert requires a bearer token and records a
//! revision through the section editor.

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use tracing::instrument;

use ruhiya_core::SectionKey;

use crate::db::ContentRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{ContentSection, SectionFields};
use crate::services::SectionEditor;
use crate::state::AppState;

/// Build the content router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/content", get(list))
        .route("/content/{section}", get(get_one).put(put_one))
}

/// List all content sections, section key ascending.
///
/// # Errors
///
/// Returns 500 on store failure.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<ContentSection>>, AppError> {
    let sections = ContentRepository::new(state.pool()).list_all().await?;
    Ok(Json(sections))
}

/// Get one content section by key.
///
/// # Errors
///
/// Returns 400 for an invalid key, 404 if the section doesn't exist.
#[instrument(skip(state))]
pub async fn get_one(
    State(state): State<AppState>,
    Path(section): Path<String>,
) -> Result<Json<ContentSection>, AppError> {
    let key = parse_key(&section)?;

    let section = ContentRepository::new(state.pool())
        .get(&key)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Section '{}' not found", key.as_str())))?;

    Ok(Json(section))
}

/// Upsert a content section.
///
/// All fields are replaced; a revision snapshot of the submitted fields
/// is appended on success.
///
/// # Errors
///
/// Returns 400 for an invalid key, 401 without a valid token, 500 on
/// store failure.
#[instrument(skip(admin, state, fields))]
pub async fn put_one(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(section): Path<String>,
    Json(fields): Json<SectionFields>,
) -> Result<Json<ContentSection>, AppError> {
    let key = parse_key(&section)?;

    let section = SectionEditor::new(state.pool())
        .put_section(&key, &fields, admin.display_label())
        .await?;

    Ok(Json(section))
}

fn parse_key(raw: &str) -> Result<SectionKey, AppError> {
    SectionKey::parse(raw).map_err(|e| AppError::Validation(e.to_string()))
}
