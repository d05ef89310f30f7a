//! Shared state injected into every HTTP handler.

use std::sync::Arc;

use crate::application::services::DynUrlService;

#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<DynUrlService>,
}

impl AppState {
    pub fn new(url_service: Arc<DynUrlService>) -> Self {
        Self { url_service }
    }
}
