//! Pairwise Pearson correlation of co-registered element-distribution maps
//!
//! The engine loads a set of equally-shaped scan images (element maps from
//! X-ray fluorescence scanning), preprocesses them into masked intensity
//! grids, correlates every unordered pair in parallel, and aggregates the
//! results into a sortable table with spreadsheet and matrix-figure output.

#![forbid(unsafe_code)]

/// Pair generation, Pearson correlation, and the parallel coordinator
pub mod correlation;
/// Input/output operations, CLI orchestration, and error handling
pub mod io;
/// Image loading, channel reduction, smoothing, masking, and caching
pub mod preprocess;
/// Correlation records, result table, annotations, and spreadsheet export
pub mod report;
/// Histogram computation and correlation-matrix figure rendering
pub mod viz;

pub use io::error::{CorrError, Result};
