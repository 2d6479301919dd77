//! Application layer services implementing business logic.
//!
//! Services consume repository traits, enforce validation and business rules,
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, lookup, deletion and redirects

pub mod services;
