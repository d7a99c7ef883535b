//! Business logic services.

pub mod auth;
pub mod editor;
pub mod email;

pub use auth::AuthService;
pub use editor::SectionEditor;
pub use email::EmailService;
