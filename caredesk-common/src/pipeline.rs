//! End-to-end reconciliation pipeline.
//!
//! A pure function of the two raw form snapshots: normalize both streams,
//! resolve follow-up revisions, reconcile, derive period keys. Recomputed
//! in full on every refresh; no state crosses runs.

use serde_json::Value;
use tracing::debug;

use crate::records::ReconciledRow;
use crate::{normalize, reconcile, revisions};

/// Build the denormalized dashboard table from the two raw record
/// collections.
///
/// Empty inputs are fine at every stage: an empty registration stream
/// produces an empty table, and an empty follow-up stream produces a table
/// where every row carries the not-visited defaults.
pub fn build_rows(registrations: &[Value], followups: &[Value]) -> Vec<ReconciledRow> {
    let complaints = normalize::normalize_registrations(registrations);
    let visits = normalize::normalize_followups(followups);
    let (latest, totals) = revisions::resolve_revisions(&visits);
    let rows = reconcile::reconcile(&complaints, &latest, &totals);

    debug!(
        registrations = registrations.len(),
        followups = followups.len(),
        reconciled = rows.len(),
        "reconciliation pipeline complete"
    );
    rows
}
