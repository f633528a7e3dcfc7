//! Categorical filtering over the reconciled table.
//!
//! Each filter dimension is a tagged [`Selection`]: either `All` (no
//! constraint) or `AnyOf` (row value must be a member). A tagged type
//! rather than a "match all" sentinel string, so a real category value can
//! never collide with the sentinel. Dimensions compose by logical AND.

use crate::records::ReconciledRow;

/// One dimension's selection: unconstrained, or a concrete accepted set.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection<T> {
    All,
    AnyOf(Vec<T>),
}

impl<T: PartialEq> Selection<T> {
    /// Whether a row's field value passes this dimension.
    pub fn matches(&self, value: &T) -> bool {
        match self {
            Selection::All => true,
            Selection::AnyOf(accepted) => accepted.contains(value),
        }
    }
}

impl<T> Default for Selection<T> {
    fn default() -> Self {
        Selection::All
    }
}

/// The composable filter over the reconciled table.
///
/// Identity-agnostic: callers supply whatever selections they want; the UI
/// layer pre-constrains the technician dimension for non-administrators
/// before this filter ever runs.
#[derive(Debug, Clone, Default)]
pub struct RowFilter {
    pub year: Selection<i32>,
    /// Period selections are `MONTH_YEAR_SORT` keys (e.g. "2025-01").
    pub period: Selection<String>,
    pub technician: Selection<String>,
    pub channel: Selection<String>,
}

impl RowFilter {
    pub fn matches(&self, row: &ReconciledRow) -> bool {
        // A row with no recorded channel only passes an unconstrained
        // channel dimension.
        let channel_ok = match (&self.channel, &row.complaint_channel) {
            (Selection::All, _) => true,
            (Selection::AnyOf(_), None) => false,
            (sel @ Selection::AnyOf(_), Some(channel)) => sel.matches(channel),
        };

        self.year.matches(&row.year)
            && self.period.matches(&row.month_year_sort)
            && self.technician.matches(&row.technician_name)
            && channel_ok
    }

    /// Apply the filter, preserving input order. An empty result is valid.
    pub fn apply<'a>(&self, rows: &'a [ReconciledRow]) -> Vec<&'a ReconciledRow> {
        rows.iter().filter(|row| self.matches(row)).collect()
    }
}
