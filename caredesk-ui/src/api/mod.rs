//! HTTP API handlers for caredesk-ui

pub mod dashboard;
pub mod health;
pub mod identity;
pub mod unresolved;
pub mod ui;

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, info};

use crate::cache::RawSnapshot;
use crate::AppState;

pub use dashboard::{get_dashboard, get_options};
pub use health::health_routes;
pub use unresolved::{get_unresolved, get_unresolved_csv};
pub use ui::{serve_app_js, serve_index};

/// API errors surfaced to the browser
#[derive(Debug)]
pub enum ApiError {
    /// Forms API unreachable or malformed payload: terminal for this
    /// render cycle, no partial dashboard.
    Fetch(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Fetch(msg) => {
                (StatusCode::BAD_GATEWAY, format!("Data fetch failed: {}", msg))
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "error": message,
        }));

        (status, body).into_response()
    }
}

/// Return the cached raw snapshot, fetching and caching it on a miss.
pub(crate) async fn load_snapshot(state: &AppState) -> Result<Arc<RawSnapshot>, ApiError> {
    if let Some(snapshot) = state.cache.get().await {
        return Ok(snapshot);
    }

    let snapshot = state.kobo.fetch_snapshot().await.map_err(|e| {
        error!("Forms API fetch failed: {}", e);
        ApiError::Fetch(e.to_string())
    })?;

    let snapshot = Arc::new(snapshot);
    state.cache.store(snapshot.clone()).await;
    Ok(snapshot)
}

/// POST /api/refresh
///
/// Explicit cache invalidation; the next dashboard request re-fetches
/// both form streams.
pub async fn post_refresh(State(state): State<AppState>) -> Json<serde_json::Value> {
    state.cache.invalidate().await;
    info!("Snapshot cache invalidated by user request");
    Json(json!({"status": "ok"}))
}
