//! Contact form route handler.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use serde_json::{Value as JsonValue, json};
use tracing::instrument;

use ruhiya_core::Email;

use crate::error::AppError;
use crate::services::email::ContactEnquiry;
use crate::state::AppState;

/// Build the contact router.
pub fn router() -> Router<AppState> {
    Router::new().route("/contact/send", post(send))
}

/// Contact form request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub message: String,
    #[serde(default)]
    pub service_name: Option<String>,
}

/// Forward a contact enquiry to the configured recipient.
///
/// Public route. Responds 500 with a generic message when SMTP is not
/// configured, so the frontend shows the same failure as a transient
/// delivery error.
///
/// # Errors
///
/// Returns 400 for missing fields or a malformed email, 500 when the
/// mailer is unavailable or delivery fails.
#[instrument(skip(state, body))]
pub async fn send(
    State(state): State<AppState>,
    Json(body): Json<ContactRequest>,
) -> Result<Json<JsonValue>, AppError> {
    if body.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if body.message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".to_string()));
    }
    let email = Email::parse(&body.email).map_err(|e| AppError::Validation(e.to_string()))?;

    let mailer = state
        .email()
        .ok_or_else(|| AppError::Internal("Email service is not configured".to_string()))?;

    let enquiry = ContactEnquiry {
        name: body.name.trim().to_string(),
        email: email.as_str().to_string(),
        phone: body.phone.filter(|p| !p.trim().is_empty()),
        message: body.message.trim().to_string(),
        service_name: body.service_name.filter(|s| !s.trim().is_empty()),
    };

    mailer.send_contact_enquiry(&enquiry).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to forward contact enquiry");
        AppError::Internal("Failed to send enquiry".to_string())
    })?;

    Ok(Json(json!({ "message": "Enquiry sent successfully" })))
}
