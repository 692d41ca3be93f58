pub mod error;
pub mod resolver;
pub mod routes;
pub mod storage;

use axum::{Router, extract::FromRef, routing::get};
use projecthost_runtime_config::ProxyConfig;
use std::time::Duration;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use resolver::Resolver;
use storage::ProjectStore;

/// Application state shared across all handlers. Built once at startup and
/// never mutated.
#[derive(Clone)]
pub struct AppState {
    pub resolver: Resolver,
}

impl FromRef<AppState> for Resolver {
    fn from_ref(state: &AppState) -> Self {
        state.resolver.clone()
    }
}

impl AppState {
    pub fn new(store: ProjectStore, config: &ProxyConfig) -> Self {
        Self {
            resolver: Resolver::new(
                store,
                &config.storage.key_prefix,
                config.serving.rewrite,
                config.serving.spa_fallback,
            ),
        }
    }

    /// State backed by the configured S3 bucket.
    pub fn from_config(config: &ProxyConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.serving.fetch_timeout_secs);
        let store = ProjectStore::s3(&config.storage, timeout)?;
        Ok(Self::new(store, config))
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health))
        .route("/projects/{repo_id}", get(routes::projects::root))
        .route("/projects/{repo_id}/", get(routes::projects::root))
        .route("/projects/{repo_id}/index.html", get(routes::projects::root))
        .route("/projects/{repo_id}/{*file_path}", get(routes::projects::asset))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
