//! Business logic services for the application layer.

pub mod alias_registry;
pub mod resolution_service;
pub mod url_service;

pub use alias_registry::{AliasRegistry, DEFAULT_MAX_ATTEMPTS};
pub use resolution_service::ResolutionService;
pub use url_service::UrlService;

use crate::domain::repositories::UrlRepository;
use crate::utils::code_generator::CodeGenerator;

/// URL service over type-erased store and generator, as held by the app state.
pub type DynUrlService = UrlService<dyn UrlRepository, dyn CodeGenerator>;
