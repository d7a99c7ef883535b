//! Revision history route handlers.
//!
//! All history routes require a bearer token. Deletes are idempotent:
//! the admin UI issues them from a possibly-stale listing, so a missing
//! id is reported as success.

use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{delete, get},
};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use tracing::instrument;

use ruhiya_core::{RevisionId, SectionKey};

use crate::db::RevisionRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::Revision;
use crate::state::AppState;

/// Build the history router.
///
/// `/history/clear` is registered alongside `/history/{id}`; the static
/// segment takes priority over the capture.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/history", get(list))
        .route("/history/clear", delete(clear))
        .route("/history/{id}", delete(delete_one))
}

/// History list query parameters.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    /// Restrict the listing to one section key.
    pub section: Option<String>,
}

/// List revisions newest-first, capped at one page.
///
/// # Errors
///
/// Returns 400 for an invalid section filter, 401 without a valid
/// token, 500 on store failure.
#[instrument(skip(admin, state))]
pub async fn list(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Vec<Revision>>, AppError> {
    let filter = section_filter(query.section.as_deref())?;

    let revisions = RevisionRepository::new(state.pool())
        .list(filter.as_ref().map(SectionKey::as_str))
        .await?;

    Ok(Json(revisions))
}

/// Delete one revision. Succeeds whether or not the id existed.
///
/// # Errors
///
/// Returns 401 without a valid token, 500 on store failure.
#[instrument(skip(admin, state))]
pub async fn delete_one(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<JsonValue>, AppError> {
    let removed = RevisionRepository::new(state.pool())
        .delete(RevisionId::new(id))
        .await?;

    if !removed {
        tracing::debug!(id, "Revision delete targeted a missing id");
    }

    Ok(Json(json!({ "message": "Revision deleted" })))
}

/// Purge the entire revision log.
///
/// # Errors
///
/// Returns 401 without a valid token, 500 on store failure.
#[instrument(skip(admin, state))]
pub async fn clear(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
) -> Result<Json<JsonValue>, AppError> {
    let deleted = RevisionRepository::new(state.pool()).clear_all().await?;

    Ok(Json(json!({ "message": "History cleared", "deleted": deleted })))
}

/// Normalize the optional section filter. An absent or empty parameter
/// means "no filter" (the admin UI submits `?section=` for the All view);
/// a non-empty value must be a valid section key.
fn section_filter(raw: Option<&str>) -> Result<Option<SectionKey>, AppError> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(SectionKey::parse)
        .transpose()
        .map_err(|e| AppError::Validation(e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_section_filter_absent_means_unfiltered() {
        assert!(section_filter(None).unwrap().is_none());
    }

    #[test]
    fn test_section_filter_empty_means_unfiltered() {
        assert!(section_filter(Some("")).unwrap().is_none());
        assert!(section_filter(Some("   ")).unwrap().is_none());
    }

    #[test]
    fn test_section_filter_normalizes_key() {
        let key = section_filter(Some(" Services ")).unwrap().unwrap();
        assert_eq!(key.as_str(), "services");
    }

    #[test]
    fn test_section_filter_rejects_invalid_key() {
        let long = "k".repeat(SectionKey::MAX_LENGTH + 1);
        assert!(matches!(
            section_filter(Some(&long)),
            Err(AppError::Validation(_))
        ));
    }
}
