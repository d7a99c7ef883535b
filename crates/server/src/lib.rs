//! Ruhiya Wellness backend library.
//!
//! REST API for the marketing site and its admin panel: content
//! sections with an append-only revision log, a service catalog,
//! testimonials, image upload, and a contact form relay.
//!
//! The binary in `main.rs` wires this into an axum server; the CLI
//! crate reuses the repositories and password hashing for migrations,
//! seeding, and admin account management.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
