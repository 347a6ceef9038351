//! Figure rendering for correlation inspection
//!
//! Renders the N×N correlation-matrix figure and standalone per-pair joint
//! histograms. Everything here is read-only over the computed correlations;
//! figures display values, they never change them.

/// Jet colormap and log density compression
pub mod colormap;
/// Histogram computation and the standalone per-pair figure
pub mod histogram;
/// The N×N correlation-matrix figure
pub mod matrix;

pub use histogram::{histogram, histogram2d};
