//! Login route handler.

use axum::{Json, Router, extract::State, routing::post};
use serde::Deserialize;
use tracing::instrument;

use crate::error::AppError;
use crate::services::AuthService;
use crate::services::auth::IssuedToken;
use crate::state::AppState;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new().route("/auth/login", post(login))
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Exchange email/password credentials for a bearer token.
///
/// Unknown email and wrong password produce the same response body, so
/// the endpoint cannot be used to probe which accounts exist.
///
/// # Errors
///
/// Returns 401 on bad credentials, 500 on store failure.
#[instrument(skip(state, body))]
pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<IssuedToken>, AppError> {
    let auth = AuthService::new(
        state.pool(),
        &state.config().jwt_secret,
        state.config().token_expiry_days,
    );

    let issued = auth.login(&body.email, &body.password).await?;

    Ok(Json(issued))
}
