//! Revision resolution for the follow-up stream.
//!
//! The follow-up stream may contain any number of revisions per business
//! key. Two independent projections come out of it:
//!
//! - **latest status per key**: the revision with the maximum parsed
//!   `_submission_time` wins; equal timestamps resolve to the
//!   later-submitted record (input order, via a stable sort).
//! - **total amount per key**: the sum of amounts across *all* revisions,
//!   not just the latest. A complaint may accrue multiple partial payments
//!   across visits.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::records::FollowupRecord;

/// Latest-revision projection for one business key.
#[derive(Debug, Clone, PartialEq)]
pub struct LatestStatus {
    pub job_status: Option<String>,
    pub technician: Option<String>,
}

/// Parse a follow-up submission timestamp.
///
/// The forms API emits RFC 3339 (with or without fractional seconds and
/// offset); minute-precision values appear in hand-edited exports.
/// Unparseable values become `None`, which orders before every parsed time,
/// so a corrupt timestamp is never mistaken for "latest" ahead of a valid
/// one.
pub fn parse_submission_time(raw: Option<&str>) -> Option<NaiveDateTime> {
    let text = raw?.trim();
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(text) {
        return Some(dt.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(text, format) {
            return Some(dt);
        }
    }
    None
}

/// Coerce a raw amount to a number. Failed coercion is 0, never a drop:
/// the revision still exists, it just carries no payment.
pub fn coerce_amount(raw: Option<&str>) -> f64 {
    raw.and_then(|text| text.trim().replace(',', "").parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Resolve the latest revision per key and the per-key amount totals.
///
/// Ordering comparator, made explicit: business key ascending, then parsed
/// timestamp ascending (`None` first), then original input order as the
/// final tie-break (guaranteed by the stable sort). The *last* record per
/// key under this ordering is the current status.
///
/// Empty input yields two empty maps; downstream joins then degrade to
/// defaults rather than failing.
pub fn resolve_revisions(
    followups: &[FollowupRecord],
) -> (HashMap<String, LatestStatus>, HashMap<String, f64>) {
    let mut ordered: Vec<(Option<NaiveDateTime>, &FollowupRecord)> = followups
        .iter()
        .map(|r| (parse_submission_time(r.submission_time.as_deref()), r))
        .collect();
    ordered.sort_by(|a, b| a.1.s_num.cmp(&b.1.s_num).then(a.0.cmp(&b.0)));

    let mut latest: HashMap<String, LatestStatus> = HashMap::new();
    let mut totals: HashMap<String, f64> = HashMap::new();

    for (_, record) in ordered {
        // Later records overwrite earlier ones, so the last per key wins.
        latest.insert(
            record.s_num.clone(),
            LatestStatus {
                job_status: record.job_status.clone(),
                technician: record.technician.clone(),
            },
        );
        *totals.entry(record.s_num.clone()).or_insert(0.0) +=
            coerce_amount(record.amount.as_deref());
    }

    (latest, totals)
}
