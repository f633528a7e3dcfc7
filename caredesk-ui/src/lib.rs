//! caredesk-ui library - Complaint dashboard web module
//!
//! Serves the browser dashboard: KPI counters, chart projections, the
//! unresolved-cases table, and its CSV export, all computed from the two
//! KoboToolbox form streams by `caredesk-common`'s pipeline.

use std::sync::Arc;

use axum::Router;
use tower_http::trace::TraceLayer;

use caredesk_common::config::Config;

pub mod api;
pub mod cache;
pub mod kobo;

use cache::SnapshotCache;
use kobo::KoboClient;

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub kobo: Arc<KoboClient>,
    pub cache: Arc<SnapshotCache>,
}

impl AppState {
    /// Create new application state with an empty snapshot cache
    pub fn new(config: Arc<Config>, kobo: Arc<KoboClient>) -> Self {
        Self {
            config,
            kobo,
            cache: Arc::new(SnapshotCache::new()),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post};

    Router::new()
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        .route("/api/dashboard", get(api::get_dashboard))
        .route("/api/options", get(api::get_options))
        .route("/api/unresolved", get(api::get_unresolved))
        .route("/api/unresolved.csv", get(api::get_unresolved_csv))
        .route("/api/refresh", post(api::post_refresh))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
