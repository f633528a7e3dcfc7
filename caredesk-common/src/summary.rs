//! Summary aggregates over the filtered reconciled table.
//!
//! Everything here is straightforward grouping/summation feeding the KPI
//! counter row and the four dashboard charts. Group-bys use `BTreeMap` so
//! output order is deterministic; period-bucketed projections sort by the
//! `MONTH_YEAR_SORT` key and carry the display label alongside.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::records::{
    ReconciledRow, NOT_VISITED_YET, STATUS_CANCELLED, STATUS_NOT_ATTENDING, STATUS_PENDING,
    STATUS_RESOLVED,
};

/// KPI counter row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KpiCounters {
    pub total_complaints: usize,
    pub resolved: usize,
    pub pending: usize,
    pub not_visited: usize,
    pub cancelled: usize,
    pub not_attending: usize,
    /// Sum of `Total_C_Amount` over the filtered rows.
    pub revenue: f64,
}

/// One bucket of a categorical count projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryCount {
    pub category: String,
    pub count: usize,
}

/// One bucket of a period-keyed count projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodCount {
    /// Sort key, e.g. "2025-01"; buckets are emitted in this order.
    pub period: String,
    /// Display label, e.g. "Jan-25".
    pub label: String,
    pub count: usize,
}

/// One bucket of the period × job-type projection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodJobTypeCount {
    pub period: String,
    pub label: String,
    pub job_type: String,
    pub count: usize,
}

pub fn kpi_counters(rows: &[&ReconciledRow]) -> KpiCounters {
    let count_status = |status: &str| rows.iter().filter(|r| r.job_status == status).count();
    KpiCounters {
        total_complaints: rows.len(),
        resolved: count_status(STATUS_RESOLVED),
        pending: count_status(STATUS_PENDING),
        not_visited: count_status(NOT_VISITED_YET),
        cancelled: count_status(STATUS_CANCELLED),
        not_attending: count_status(STATUS_NOT_ATTENDING),
        revenue: rows.iter().map(|r| r.total_amount).sum(),
    }
}

/// Complaint count by channel (pie chart). Rows with no recorded channel
/// are omitted, matching the dashboard's chart behavior.
pub fn count_by_channel(rows: &[&ReconciledRow]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        if let Some(channel) = row.complaint_channel.as_deref() {
            *counts.entry(channel).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}

/// Complaint count by period × job type (grouped bar chart), sorted by
/// period key then job type.
pub fn count_by_period_job_type(rows: &[&ReconciledRow]) -> Vec<PeriodJobTypeCount> {
    let mut counts: BTreeMap<(&str, &str), (&str, usize)> = BTreeMap::new();
    for row in rows {
        let Some(job_type) = row.job_type.as_deref() else {
            continue;
        };
        let entry = counts
            .entry((row.month_year_sort.as_str(), job_type))
            .or_insert((row.month_year.as_str(), 0));
        entry.1 += 1;
    }
    counts
        .into_iter()
        .map(|((period, job_type), (label, count))| PeriodJobTypeCount {
            period: period.to_string(),
            label: label.to_string(),
            job_type: job_type.to_string(),
            count,
        })
        .collect()
}

/// Top-N product classifications by complaint count (bar chart). Ties
/// break alphabetically so output is deterministic.
pub fn top_products(rows: &[&ReconciledRow], n: usize) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for row in rows {
        if let Some(product) = row.product_classification.as_deref() {
            *counts.entry(product).or_insert(0) += 1;
        }
    }
    let mut ranked: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect();
    // BTreeMap iteration is already alphabetical; the stable sort keeps
    // that order within equal counts.
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(n);
    ranked
}

/// Complaint count by period (trend line), sorted chronologically via the
/// period sort key.
pub fn monthly_trend(rows: &[&ReconciledRow]) -> Vec<PeriodCount> {
    let mut counts: BTreeMap<&str, (&str, usize)> = BTreeMap::new();
    for row in rows {
        let entry = counts
            .entry(row.month_year_sort.as_str())
            .or_insert((row.month_year.as_str(), 0));
        entry.1 += 1;
    }
    counts
        .into_iter()
        .map(|(period, (label, count))| PeriodCount {
            period: period.to_string(),
            label: label.to_string(),
            count,
        })
        .collect()
}
