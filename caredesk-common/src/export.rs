//! CSV export of unresolved cases.
//!
//! The dashboard offers a download of every complaint still in
//! "Not Visited Yet" status, with human-readable column labels, for the
//! dispatch team to work through offline.

use crate::records::{ReconciledRow, NOT_VISITED_YET};
use crate::{Error, Result};

/// Column headers of the unresolved-cases export, in output order.
pub const EXPORT_HEADERS: [&str; 8] = [
    "Complaint ID",
    "Job Type",
    "Registration Date",
    "Customer Name",
    "Address",
    "Mobile Number",
    "Product",
    "Issue History",
];

/// Render the rows currently in "Not Visited Yet" status as CSV.
///
/// Registration dates are formatted day-month-year. Missing optional
/// fields render as empty cells.
pub fn unresolved_csv<'a, I>(rows: I) -> Result<String>
where
    I: IntoIterator<Item = &'a ReconciledRow>,
{
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(EXPORT_HEADERS)
        .map_err(|e| Error::Export(e.to_string()))?;

    for row in rows.into_iter().filter(|r| r.job_status == NOT_VISITED_YET) {
        let reg_date = row.reg_date.format("%d-%m-%Y").to_string();
        writer
            .write_record([
                row.s_num.as_str(),
                row.job_type.as_deref().unwrap_or(""),
                reg_date.as_str(),
                row.customer_name.as_deref().unwrap_or(""),
                row.address.as_deref().unwrap_or(""),
                row.mobile_number.as_deref().unwrap_or(""),
                row.product_classification.as_deref().unwrap_or(""),
                row.issue_history.as_deref().unwrap_or(""),
            ])
            .map_err(|e| Error::Export(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| Error::Export(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
}
