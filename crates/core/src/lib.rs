//! Ruhiya Core - Shared types library.
//!
//! This crate provides common types used across the Ruhiya components:
//! - `server` - REST backend for the public site and admin panel
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database access,
//! no HTTP clients. This keeps it lightweight and allows it to be used
//! anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, emails, and section keys

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
