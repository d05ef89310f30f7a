//! Core domain entities.
//!
//! Entities are plain data structures. Separate input types are used for
//! creation (`NewUrlRecord`) and partial updates (`UrlPatch`).

pub mod url_record;

pub use url_record::{NewUrlRecord, UrlAnalytics, UrlPatch, UrlRecord};
