//! Domain layer: entities, record store contract and resolution outcome.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Record store trait and its error type
//! - [`resolution`] - Outcome of resolving a short code
//!
//! The domain layer has no dependency on infrastructure or presentation
//! layers. Business rules live in [`crate::application::services`].

pub mod entities;
pub mod repositories;
pub mod resolution;
