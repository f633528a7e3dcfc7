//! Reconciliation: left join of registrations against the resolved
//! follow-up projections.
//!
//! Every date-valid registration survives the join whether or not any
//! follow-up exists for its key; absent matches get documented defaults,
//! never nulls. Follow-up-only keys are dropped silently: they reference
//! complaints the system has no registration record for and cannot be
//! displayed without the registration fields.

use std::collections::{HashMap, HashSet};

use tracing::warn;

use crate::period;
use crate::records::{ComplaintRecord, ReconciledRow, NOT_ASSIGNED, NOT_VISITED_YET};
use crate::revisions::LatestStatus;

/// Join registrations with the latest-status and total-amount projections.
///
/// - Rows with an unparseable or missing registration date are dropped:
///   they cannot be placed in any period bucket.
/// - Duplicate business keys in the registration stream are collapsed
///   keeping the first-seen record; the collapse is logged at WARN since
///   upstream has never confirmed whether duplicates are intentional.
/// - Defaults apply only on absence: status [`NOT_VISITED_YET`], total 0,
///   technician [`NOT_ASSIGNED`] (a matched revision with an empty
///   technician field gets the same default as no match at all).
pub fn reconcile(
    registrations: &[ComplaintRecord],
    latest: &HashMap<String, LatestStatus>,
    totals: &HashMap<String, f64>,
) -> Vec<ReconciledRow> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut rows = Vec::with_capacity(registrations.len());

    for record in registrations {
        let Some(reg_date) = period::parse_reg_date(record.complaint_reg_date.as_deref()) else {
            continue;
        };
        if !seen.insert(record.s_num.as_str()) {
            warn!(s_num = %record.s_num, "duplicate registration for business key, keeping first-seen");
            continue;
        }

        let resolved = latest.get(&record.s_num);
        let job_status = resolved
            .and_then(|r| r.job_status.clone())
            .unwrap_or_else(|| NOT_VISITED_YET.to_string());
        let technician_name = resolved
            .and_then(|r| r.technician.clone())
            .unwrap_or_else(|| NOT_ASSIGNED.to_string());
        let total_amount = totals.get(&record.s_num).copied().unwrap_or(0.0);

        rows.push(ReconciledRow {
            s_num: record.s_num.clone(),
            job_type: record.job_type.clone(),
            reg_date,
            product_classification: record.product_classification.clone(),
            complaint_channel: record.complaint_channel.clone(),
            customer_name: record.customer_name.clone(),
            address: record.address.clone(),
            mobile_number: record.mobile_number.clone(),
            issue_history: record.issue_history.clone(),
            job_status,
            technician_name,
            total_amount,
            year: period::year(reg_date),
            month_year: period::month_year_label(reg_date),
            month_year_sort: period::month_year_sort_key(reg_date),
        });
    }

    rows
}
