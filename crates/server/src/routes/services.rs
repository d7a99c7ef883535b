//! Service catalog route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde_json::{Value as JsonValue, json};
use tracing::instrument;

use ruhiya_core::ServiceId;

use crate::db::ServiceRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{NewService, Service, ServicePatch};
use crate::services::SectionEditor;
use crate::state::AppState;

/// Build the services router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/services", get(list).post(create))
        .route("/services/{id}", put(update).delete(delete))
}

/// List all services, sort order ascending.
///
/// # Errors
///
/// Returns 500 on store failure.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Service>>, AppError> {
    let services = ServiceRepository::new(state.pool()).list_all().await?;
    Ok(Json(services))
}

/// Create a service.
///
/// # Errors
///
/// Returns 400 if the title is missing, 401 without a valid token, 500
/// on store failure.
#[instrument(skip(admin, state, body))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<NewService>,
) -> Result<(StatusCode, Json<Service>), AppError> {
    let service = SectionEditor::new(state.pool())
        .create_service(&body, admin.display_label())
        .await?;

    Ok((StatusCode::CREATED, Json(service)))
}

/// Partially update a service. Absent fields keep their stored values.
///
/// # Errors
///
/// Returns 400 for a blank title, 404 if the id is unknown, 401 without
/// a valid token, 500 on store failure.
#[instrument(skip(admin, state, body))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<ServicePatch>,
) -> Result<Json<Service>, AppError> {
    let service = SectionEditor::new(state.pool())
        .update_service(ServiceId::new(id), &body, admin.display_label())
        .await?;

    Ok(Json(service))
}

/// Delete a service permanently. No revision is recorded.
///
/// # Errors
///
/// Returns 404 if the id is unknown, 401 without a valid token, 500 on
/// store failure.
#[instrument(skip(admin, state))]
pub async fn delete(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<JsonValue>, AppError> {
    SectionEditor::new(state.pool())
        .delete_service(ServiceId::new(id))
        .await?;

    Ok(Json(json!({ "message": "Service deleted" })))
}
