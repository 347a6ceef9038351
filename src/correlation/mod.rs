//! Pairwise correlation core
//!
//! Generates all unordered map pairs, computes masked Pearson statistics
//! per pair, and fans the pair list out across a thread pool while
//! preserving submission order.

/// Ordered parallel coordinator for independent pair tasks
pub mod executor;
/// Unordered 2-combination generation and canonical pair keys
pub mod pairs;
/// Masked Pearson correlation and conditional linear regression
pub mod pearson;

pub use executor::{CorrelationTask, PairCorrelation};
pub use pearson::{CorrelationParams, Measures, Regression};
