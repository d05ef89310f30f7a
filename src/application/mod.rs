//! Application layer services implementing business logic.
//!
//! Services consume the repository trait and provide a clean API for HTTP
//! handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::alias_registry::AliasRegistry`] - Short code allocation
//! - [`services::resolution_service::ResolutionService`] - Expiry-aware lookup and click counting
//! - [`services::url_service::UrlService`] - The full operation set

pub mod services;
