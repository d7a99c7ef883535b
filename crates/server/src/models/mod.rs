//! Domain models and wire DTOs.
//!
//! Wire field names are camelCase (`imageUrl`, `referenceId`, ...) to match
//! the admin frontend; database columns stay snake_case.

pub mod admin_user;
pub mod catalog;
pub mod content;
pub mod revision;

pub use admin_user::{AdminUser, CurrentAdmin};
pub use catalog::{NewService, NewTestimonial, Service, ServicePatch, Testimonial, TestimonialPatch};
pub use content::{ContentSection, SectionFields};
pub use revision::Revision;
