//! Dashboard summary and filter-options endpoints.

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};
use serde::{Deserialize, Serialize};

use caredesk_common::filter::{RowFilter, Selection};
use caredesk_common::pipeline::build_rows;
use caredesk_common::records::ReconciledRow;
use caredesk_common::summary::{
    self, CategoryCount, KpiCounters, PeriodCount, PeriodJobTypeCount,
};

use super::identity::{constrain_technician, identity_from_headers};
use super::{load_snapshot, ApiError};
use crate::AppState;

/// Filter query parameters: comma-separated multi-value lists. An absent
/// parameter means "match all" for that dimension.
#[derive(Debug, Default, Deserialize)]
pub struct FilterQuery {
    pub years: Option<String>,
    /// Period sort keys, e.g. `2025-01,2025-02`.
    pub periods: Option<String>,
    pub technicians: Option<String>,
    pub channels: Option<String>,
}

fn parse_list(raw: &Option<String>) -> Option<Vec<String>> {
    let raw = raw.as_deref()?;
    let values: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if values.is_empty() {
        None
    } else {
        Some(values)
    }
}

fn string_selection(raw: &Option<String>) -> Selection<String> {
    match parse_list(raw) {
        Some(values) => Selection::AnyOf(values),
        None => Selection::All,
    }
}

fn year_selection(raw: &Option<String>) -> Selection<i32> {
    match parse_list(raw) {
        // Non-numeric year values are ignored rather than erroring; a
        // selection that loses all its values falls back to match-all.
        Some(values) => {
            let years: Vec<i32> = values.iter().filter_map(|v| v.parse().ok()).collect();
            if years.is_empty() {
                Selection::All
            } else {
                Selection::AnyOf(years)
            }
        }
        None => Selection::All,
    }
}

impl FilterQuery {
    /// Build the row filter, applying the identity's technician constraint.
    pub fn into_filter(self, state: &AppState, headers: &HeaderMap) -> RowFilter {
        let identity = identity_from_headers(headers, &state.config.auth);
        let technician = constrain_technician(&identity, string_selection(&self.technicians));

        RowFilter {
            year: year_selection(&self.years),
            period: string_selection(&self.periods),
            technician,
            channel: string_selection(&self.channels),
        }
    }

    fn is_unfiltered(&self) -> bool {
        self.years.is_none()
            && self.periods.is_none()
            && self.technicians.is_none()
            && self.channels.is_none()
    }
}

/// Dashboard summary response: the KPI row plus the four chart projections.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub kpis: KpiCounters,
    pub channels: Vec<CategoryCount>,
    pub period_job_types: Vec<PeriodJobTypeCount>,
    pub top_products: Vec<CategoryCount>,
    pub trend: Vec<PeriodCount>,
    pub row_count: usize,
    /// Whether any filter dimension was constrained, so the page can tell
    /// "no data for these filters" apart from "no data at all".
    pub filters_applied: bool,
    pub fetched_at: String,
}

/// GET /api/dashboard
///
/// Runs the full pipeline over the cached snapshot (fetching on a cache
/// miss), applies the requested filters, and returns the KPI counters and
/// chart projections. A fetch failure is terminal: 502, no partial data.
pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<FilterQuery>,
) -> Result<Json<DashboardResponse>, ApiError> {
    let snapshot = load_snapshot(&state).await?;
    let rows = build_rows(&snapshot.registrations, &snapshot.followups);

    let filters_applied = !query.is_unfiltered();
    let filter = query.into_filter(&state, &headers);
    let filtered = filter.apply(&rows);

    Ok(Json(DashboardResponse {
        kpis: summary::kpi_counters(&filtered),
        channels: summary::count_by_channel(&filtered),
        period_job_types: summary::count_by_period_job_type(&filtered),
        top_products: summary::top_products(&filtered, 5),
        trend: summary::monthly_trend(&filtered),
        row_count: filtered.len(),
        filters_applied,
        fetched_at: snapshot.fetched_at.to_rfc3339(),
    }))
}

/// One period option: sort key plus display label.
#[derive(Debug, Serialize)]
pub struct PeriodOption {
    pub period: String,
    pub label: String,
}

/// Filter options for the sidebar, computed from the unfiltered table.
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub years: Vec<i32>,
    /// Sorted by sort key, so the sidebar lists periods chronologically.
    pub periods: Vec<PeriodOption>,
    pub technicians: Vec<String>,
    pub channels: Vec<String>,
}

/// GET /api/options
pub async fn get_options(
    State(state): State<AppState>,
) -> Result<Json<OptionsResponse>, ApiError> {
    let snapshot = load_snapshot(&state).await?;
    let rows = build_rows(&snapshot.registrations, &snapshot.followups);
    Ok(Json(options_from_rows(&rows)))
}

fn options_from_rows(rows: &[ReconciledRow]) -> OptionsResponse {
    let mut years: Vec<i32> = rows.iter().map(|r| r.year).collect();
    years.sort_unstable();
    years.dedup();

    let mut periods: Vec<(String, String)> = rows
        .iter()
        .map(|r| (r.month_year_sort.clone(), r.month_year.clone()))
        .collect();
    periods.sort();
    periods.dedup();

    let mut technicians: Vec<String> = rows.iter().map(|r| r.technician_name.clone()).collect();
    technicians.sort();
    technicians.dedup();

    let mut channels: Vec<String> = rows
        .iter()
        .filter_map(|r| r.complaint_channel.clone())
        .collect();
    channels.sort();
    channels.dedup();

    OptionsResponse {
        years,
        periods: periods
            .into_iter()
            .map(|(period, label)| PeriodOption { period, label })
            .collect(),
        technicians,
        channels,
    }
}
