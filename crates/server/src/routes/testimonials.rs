//! Testimonial route handlers.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::{get, put},
};
use serde_json::{Value as JsonValue, json};
use tracing::instrument;

use ruhiya_core::TestimonialId;

use crate::db::TestimonialRepository;
use crate::error::AppError;
use crate::middleware::RequireAdmin;
use crate::models::{NewTestimonial, Testimonial, TestimonialPatch};
use crate::services::SectionEditor;
use crate::state::AppState;

/// Build the testimonials router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/testimonials", get(list).post(create))
        .route("/testimonials/{id}", put(update).delete(delete))
}

/// List all testimonials in insertion order.
///
/// # Errors
///
/// Returns 500 on store failure.
#[instrument(skip(state))]
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Testimonial>>, AppError> {
    let testimonials = TestimonialRepository::new(state.pool()).list_all().await?;
    Ok(Json(testimonials))
}

/// Create a testimonial.
///
/// # Errors
///
/// Returns 400 if name or text is missing, 401 without a valid token,
/// 500 on store failure.
#[instrument(skip(admin, state, body))]
pub async fn create(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(body): Json<NewTestimonial>,
) -> Result<(StatusCode, Json<Testimonial>), AppError> {
    let testimonial = SectionEditor::new(state.pool())
        .create_testimonial(&body, admin.display_label())
        .await?;

    Ok((StatusCode::CREATED, Json(testimonial)))
}

/// Partially update a testimonial. Absent fields keep their stored values.
///
/// # Errors
///
/// Returns 400 for a blank name or text, 404 if the id is unknown, 401
/// without a valid token, 500 on store failure.
#[instrument(skip(admin, state, body))]
pub async fn update(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(body): Json<TestimonialPatch>,
) -> Result<Json<Testimonial>, AppError> {
    let testimonial = SectionEditor::new(state.pool())
        .update_testimonial(TestimonialId::new(id), &body, admin.display_label())
        .await?;

    Ok(Json(testimonial))
}

/// Delete a testimonial permanently. No revision is recorded.
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
        .delete_testimonial(TestimonialId::new(id))
        .await?;

    Ok(Json(json!({ "message": "Testimonial deleted" })))
}
