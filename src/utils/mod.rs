//! Utility functions shared by the service and the HTTP layer.
//!
//! - [`code_generator`] - Short code generation and format validation
//! - [`target_url`] - Target URL validation

pub mod code_generator;
pub mod target_url;
