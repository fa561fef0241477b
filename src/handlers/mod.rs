// handlers/mod.rs - HTTP surface of the tenancy service
//
// Routes are public (health) or expect an authenticated CurrentUser placed
// in the request extensions by the authentication layer in front of us.

pub mod health;
pub mod tenants;

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::tenancy::TenancyBackend;

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn TenancyBackend>,
}

impl AppState {
    pub fn new(backend: impl TenancyBackend + 'static) -> Self {
        Self {
            backend: Arc::new(backend),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/health", get(health::get))
        // Tenants visible to the current user
        .route("/api/tenants", get(tenants::list))
        .route("/api/tenants/:id", get(tenants::show))
        .with_state(state)
        .layer(CorsLayer::permissive())
}
