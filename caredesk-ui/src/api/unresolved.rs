//! Unresolved-cases table and its CSV export.

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use caredesk_common::export::unresolved_csv;
use caredesk_common::pipeline::build_rows;
use caredesk_common::records::{ReconciledRow, NOT_VISITED_YET};

use super::dashboard::FilterQuery;
use super::{load_snapshot, ApiError};
use crate::AppState;

async fn filtered_unresolved(
    state: &AppState,
    headers: &HeaderMap,
    query: FilterQuery,
) -> Result<Vec<ReconciledRow>, ApiError> {
    let snapshot = load_snapshot(state).await?;
    let rows = build_rows(&snapshot.registrations, &snapshot.followups);
    let filter = query.into_filter(state, headers);
    Ok(filter
        .apply(&rows)
        .into_iter()
        .filter(|r| r.job_status == NOT_VISITED_YET)
        .cloned()
        .collect())
}

/// GET /api/unresolved
///
/// JSON table of complaints still awaiting a first technician visit,
/// under the same filter parameters as the dashboard.
pub async fn get_unresolved(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FilterQuery>,
) -> Result<Json<Vec<ReconciledRow>>, ApiError> {
    let rows = filtered_unresolved(&state, &headers, query).await?;
    Ok(Json(rows))
}

/// GET /api/unresolved.csv
///
/// The same table as a CSV download for the dispatch team.
pub async fn get_unresolved_csv(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FilterQuery>,
) -> Result<Response, ApiError> {
    let rows = filtered_unresolved(&state, &headers, query).await?;
    let csv_text = unresolved_csv(rows.iter()).map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        StatusCode::OK,
        [
            ("content-type", "text/csv; charset=utf-8"),
            (
                "content-disposition",
                "attachment; filename=\"unresolved-complaints.csv\"",
            ),
        ],
        csv_text,
    )
        .into_response())
}
