#![allow(dead_code)]

use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use shortcode::application::services::{DynUrlService, UrlService};
use shortcode::domain::entities::UrlRecord;
use shortcode::domain::repositories::UrlRepository;
use shortcode::infrastructure::persistence::InMemoryUrlRepository;
use shortcode::routes::router;
use shortcode::state::AppState;
use shortcode::utils::code_generator::{CodeGenerator, RandomCodeGenerator};

pub fn create_test_state() -> AppState {
    let repository: Arc<dyn UrlRepository> = Arc::new(InMemoryUrlRepository::new());
    let generator: Arc<dyn CodeGenerator> = Arc::new(RandomCodeGenerator::seeded(6, 42));
    let service: Arc<DynUrlService> = Arc::new(UrlService::new(repository, generator, 10));

    AppState::new(service)
}

pub fn create_test_server(state: AppState) -> TestServer {
    TestServer::new(router(state)).unwrap()
}

pub async fn create_test_url(state: &AppState, url: &str, alias: Option<&str>) -> UrlRecord {
    state
        .url_service
        .create(url.to_string(), alias.map(str::to_string), None)
        .await
        .unwrap()
}

pub async fn create_expired_url(state: &AppState, url: &str, alias: &str) -> UrlRecord {
    create_url_expiring_at(state, url, alias, Utc::now() - Duration::hours(1)).await
}

pub async fn create_url_expiring_at(
    state: &AppState,
    url: &str,
    alias: &str,
    expires_at: DateTime<Utc>,
) -> UrlRecord {
    state
        .url_service
        .create(url.to_string(), Some(alias.to_string()), Some(expires_at))
        .await
        .unwrap()
}
