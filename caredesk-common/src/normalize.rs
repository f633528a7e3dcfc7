//! Record normalization for raw form submissions.
//!
//! Each raw submission arrives as an untyped JSON record whose field names
//! carry form-group namespace prefixes (e.g. `Registration/S_Num`). This
//! module flattens nested groups, strips the known prefixes, and projects
//! each record onto a fixed allow-list per stream. Fields outside the
//! allow-list are discarded; that is a deliberate privacy boundary, not an
//! oversight.

use serde_json::{Map, Value};

use crate::records::{ComplaintRecord, FollowupRecord};

/// Namespace prefix carried by stream A (registration) fields.
const REGISTRATION_PREFIX: &str = "Registration/";

/// Namespace prefixes carried by stream B (follow-up) fields. A single
/// record's fields may originate from different nested form groups, so all
/// three are stripped in sequence.
const FOLLOWUP_PREFIXES: [&str; 3] = ["C_Followup/", "C_Registration/", "C_invoice_group/"];

/// Flatten one raw submission into `group/field` keys.
///
/// Nested objects are joined with the forms API's group separator; scalar
/// leaves are kept as-is. Arrays and nulls are ignored (no allow-listed
/// field is repeat-group valued).
fn flatten_record(record: &Value) -> Map<String, Value> {
    let mut flat = Map::new();
    if let Value::Object(fields) = record {
        flatten_into(&mut flat, "", fields);
    }
    flat
}

fn flatten_into(out: &mut Map<String, Value>, prefix: &str, fields: &Map<String, Value>) {
    for (name, value) in fields {
        let key = if prefix.is_empty() {
            name.clone()
        } else {
            format!("{}/{}", prefix, name)
        };
        match value {
            Value::Object(nested) => flatten_into(out, &key, nested),
            Value::Null | Value::Array(_) => {}
            scalar => {
                out.insert(key, scalar.clone());
            }
        }
    }
}

/// Strip the first matching namespace prefix from a field name.
fn strip_prefixes<'a>(name: &'a str, prefixes: &[&str]) -> &'a str {
    for prefix in prefixes {
        if let Some(stripped) = name.strip_prefix(prefix) {
            return stripped;
        }
    }
    name
}

/// Read an allow-listed field as text, treating empty strings as absent.
fn field_text(flat: &Map<String, Value>, name: &str) -> Option<String> {
    let value = flat.get(name)?;
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// Normalize the registration stream (stream A).
///
/// Records lacking the business key are dropped: they can neither join with
/// follow-ups nor be displayed as a complaint. Empty input yields empty
/// output.
pub fn normalize_registrations(raw: &[Value]) -> Vec<ComplaintRecord> {
    raw.iter()
        .filter_map(|record| {
            let flat: Map<String, Value> = flatten_record(record)
                .into_iter()
                .map(|(name, value)| {
                    (strip_prefixes(&name, &[REGISTRATION_PREFIX]).to_string(), value)
                })
                .collect();

            let s_num = field_text(&flat, "S_Num")?;
            Some(ComplaintRecord {
                s_num,
                job_type: field_text(&flat, "Job_Type"),
                complaint_reg_date: field_text(&flat, "Complaint_Reg_Date"),
                product_classification: field_text(&flat, "Product_classification"),
                complaint_channel: field_text(&flat, "complaint_channel"),
                customer_name: field_text(&flat, "Customer_name"),
                address: field_text(&flat, "address"),
                mobile_number: field_text(&flat, "Mobile_number"),
                issue_history: field_text(&flat, "issue_history"),
            })
        })
        .collect()
}

/// Normalize the follow-up stream (stream B).
///
/// The child form's foreign-key field `C_id_nb` is renamed to the shared
/// join-key name `S_Num` used by stream A. Records lacking the key are
/// dropped. Empty input yields empty output.
pub fn normalize_followups(raw: &[Value]) -> Vec<FollowupRecord> {
    raw.iter()
        .filter_map(|record| {
            let flat: Map<String, Value> = flatten_record(record)
                .into_iter()
                .map(|(name, value)| {
                    (strip_prefixes(&name, &FOLLOWUP_PREFIXES).to_string(), value)
                })
                .collect();

            let s_num = field_text(&flat, "C_id_nb")?;
            Some(FollowupRecord {
                s_num,
                technician: field_text(&flat, "C_Technician_Did"),
                job_status: field_text(&flat, "C_Job_Status"),
                payment_status: field_text(&flat, "C_Payment_status"),
                payment_mode: field_text(&flat, "C_Payment_mode"),
                amount: field_text(&flat, "C_Amount"),
                technician_received: field_text(&flat, "C_Technician_received"),
                submission_time: field_text(&flat, "_submission_time"),
            })
        })
        .collect()
}
