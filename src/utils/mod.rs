//! Utility functions shared across layers.
//!
//! - [`code_generator`] - Short code generation and custom alias validation
//! - [`url_validator`] - Destination URL validation
//! - [`db_error`] - SQLx error classification

pub mod code_generator;
pub mod db_error;
pub mod url_validator;
