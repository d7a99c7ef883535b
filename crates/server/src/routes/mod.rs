//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health                 - Liveness check
//! GET    /health/ready           - Readiness check (database ping)
//!
//! # Auth
//! POST   /auth/login             - Email/password login, returns bearer token
//!
//! # Content sections
//! GET    /content                - List all sections (public)
//! GET    /content/{section}      - Get one section (public)
//! PUT    /content/{section}      - Upsert a section (bearer)
//!
//! # Services
//! GET    /services               - List services (public)
//! POST   /services               - Create service (bearer)
//! PUT    /services/{id}          - Partial update (bearer)
//! DELETE /services/{id}          - Delete (bearer)
//!
//! # Testimonials
//! GET    /testimonials           - List testimonials (public)
//! POST   /testimonials           - Create testimonial (bearer)
//! PUT    /testimonials/{id}      - Partial update (bearer)
//! DELETE /testimonials/{id}      - Delete (bearer)
//!
//! # History
//! GET    /history?section=<key>  - List revisions, newest first (bearer)
//! DELETE /history/clear          - Purge all revisions (bearer)
//! DELETE /history/{id}           - Delete one revision (bearer)
//!
//! # Assets
//! POST   /upload                 - Multipart image upload (bearer)
//!
//! # Contact
//! POST   /contact/send           - Forward a contact enquiry (public)
//! ```

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod contact;
pub mod content;
pub mod health;
pub mod history;
pub mod services;
pub mod testimonials;
pub mod upload;

/// Build the application router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(auth::router())
        .merge(content::router())
        .merge(services::router())
        .merge(testimonials::router())
        .merge(history::router())
        .merge(upload::router())
        .merge(contact::router())
}
