//! Result aggregation and reporting
//!
//! Collects per-pair correlation records into an ordered table that can be
//! sorted, filtered into named subsets, enriched with external annotations,
//! and exported as a styled spreadsheet.

/// External pair annotations and the left-merge into the table
pub mod annotations;
/// Spreadsheet export with named sheets and conditional formatting
pub mod export;
/// Correlation records and the sortable result table
pub mod records;

pub use annotations::AnnotationSet;
pub use records::{CorrelationRecord, PairFlags, ResultTable, SortDirection, SortField};
