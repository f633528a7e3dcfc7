//! # CareDesk Common Library
//!
//! Shared code for the CareDesk complaint dashboard:
//! - Normalized record types for the two form streams
//! - The reconciliation pipeline (normalize, revisions, reconcile, period keys)
//! - Filter engine and summary aggregates
//! - CSV export of unresolved cases
//! - Configuration loading

pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod normalize;
pub mod period;
pub mod pipeline;
pub mod reconcile;
pub mod records;
pub mod revisions;
pub mod summary;

pub use error::{Error, Result};
pub use records::{ComplaintRecord, FollowupRecord, ReconciledRow};
