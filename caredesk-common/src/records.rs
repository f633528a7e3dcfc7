//! Normalized record types for the two form streams and the reconciled table.
//!
//! Stream A ("Registration") produces one `ComplaintRecord` per submitted
//! complaint registration. Stream B ("Follow-up") produces zero or more
//! `FollowupRecord` revisions per complaint over its lifecycle, keyed by the
//! shared business key `S_Num`.

use chrono::NaiveDate;
use serde::Serialize;

/// Status assigned to complaints with no follow-up submission yet.
pub const NOT_VISITED_YET: &str = "Not Visited Yet";

/// Technician name assigned when no technician has taken the complaint.
pub const NOT_ASSIGNED: &str = "Not Assigned";

/// Follow-up status vocabulary used by the KPI counters.
///
/// The status field is free text as far as the pipeline is concerned; these
/// are the values the upstream form actually submits.
pub const STATUS_RESOLVED: &str = "Resolved_Closed";
pub const STATUS_PENDING: &str = "Pending";
pub const STATUS_CANCELLED: &str = "Cancelled";
pub const STATUS_NOT_ATTENDING: &str = "Not_attending";

/// One normalized complaint registration (stream A).
///
/// All fields except the business key are optional: the normalizer projects
/// onto an allow-list and silently omits whatever a given submission lacks.
#[derive(Debug, Clone, PartialEq)]
pub struct ComplaintRecord {
    /// Business key linking registration to follow-up revisions.
    pub s_num: String,
    pub job_type: Option<String>,
    /// Raw registration date text; parsed (and validated) by the reconciler.
    pub complaint_reg_date: Option<String>,
    pub product_classification: Option<String>,
    pub complaint_channel: Option<String>,
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub mobile_number: Option<String>,
    pub issue_history: Option<String>,
}

/// One normalized follow-up revision (stream B).
///
/// Multiple revisions may share an `s_num`; each represents one technician
/// visit / payment event, not a unique entity.
#[derive(Debug, Clone, PartialEq)]
pub struct FollowupRecord {
    /// Foreign key, renamed from the child form's `C_id_nb` field.
    pub s_num: String,
    pub technician: Option<String>,
    pub job_status: Option<String>,
    pub payment_status: Option<String>,
    pub payment_mode: Option<String>,
    /// Raw amount text; coerced to a number (failure -> 0) by the resolver.
    pub amount: Option<String>,
    pub technician_received: Option<String>,
    /// Raw submission timestamp of this specific revision.
    pub submission_time: Option<String>,
}

/// One row of the denormalized dashboard table: a complaint registration
/// joined with its resolved follow-up status and aggregated payments.
///
/// Recomputed in full on every data refresh; never mutated incrementally.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReconciledRow {
    pub s_num: String,
    pub job_type: Option<String>,
    pub reg_date: NaiveDate,
    pub product_classification: Option<String>,
    pub complaint_channel: Option<String>,
    pub customer_name: Option<String>,
    pub address: Option<String>,
    pub mobile_number: Option<String>,
    pub issue_history: Option<String>,
    /// Status of the latest follow-up revision, or [`NOT_VISITED_YET`].
    pub job_status: String,
    /// Technician of the latest follow-up revision, or [`NOT_ASSIGNED`].
    pub technician_name: String,
    /// Sum of amounts across *all* revisions for this key (0 if none).
    pub total_amount: f64,
    /// Calendar year of `reg_date`.
    pub year: i32,
    /// Display label for the registration period, e.g. "Jan-25".
    pub month_year: String,
    /// Lexically-sortable period key, e.g. "2025-01". Sorting this string
    /// reproduces chronological order across year boundaries; consumers
    /// bucket by this key and display `month_year`.
    pub month_year_sort: String,
}
