//! Ordered parallel execution of independent pair correlations

use crate::correlation::pairs;
use crate::correlation::pearson::{self, CorrelationParams, Measures};
use crate::io::error::Result;
use crate::preprocess::ElementMap;
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use std::sync::Arc;

/// One unit of parallel work: an unordered pair of preprocessed maps
///
/// Tasks share the underlying grids through `Arc`, so fanning a pair list
/// out across the pool copies pointers, not pixels. No task mutates a
/// grid; workers are fully independent.
#[derive(Clone)]
pub struct CorrelationTask {
    /// First map of the pair (input order)
    pub first: Arc<ElementMap>,
    /// Second map of the pair
    pub second: Arc<ElementMap>,
}

impl CorrelationTask {
    /// Canonical pair key for this task
    pub fn name(&self) -> String {
        pairs::pair_name(&self.first.name, &self.second.name)
    }
}

/// Correlation result for one pair, tagged with its canonical key
#[derive(Debug, Clone)]
pub struct PairCorrelation {
    /// Canonical pair key
    pub pair: String,
    /// Computed correlation measures
    pub measures: Measures,
}

/// Parallel map over independent tasks that preserves input order
///
/// Output index i always holds the result of input index i, regardless of
/// which worker finished first. A panicking task (worker death) propagates
/// out of this call and fails the whole run; panics are never converted
/// into per-item results, since a silently dropped pair would break the
/// completeness guarantee of the result table.
pub fn ordered_parallel_map<I, R, F>(items: &[I], task: F) -> Vec<R>
where
    I: Sync,
    R: Send,
    F: Fn(&I) -> R + Send + Sync,
{
    items.par_iter().map(task).collect()
}

/// Correlate every task in parallel, returning records in task order
///
/// `on_complete` is invoked once per finished pair (from worker threads)
/// and exists for progress reporting.
///
/// # Errors
///
/// Returns the first per-pair error in task order. Numeric degeneracies do
/// not error (see [`pearson::Regression`]); only precondition violations
/// such as shape mismatches do.
pub fn correlate_pairs<F>(
    tasks: &[CorrelationTask],
    params: &CorrelationParams,
    on_complete: F,
) -> Result<Vec<PairCorrelation>>
where
    F: Fn() + Sync,
{
    let outcomes = ordered_parallel_map(tasks, |task| {
        let outcome = correlate_task(task, params);
        on_complete();
        outcome
    });

    outcomes.into_iter().collect()
}

/// Sequential twin of [`correlate_pairs`]
///
/// Kept for small runs and comparison benchmarks; identical results and
/// ordering, no thread pool.
///
/// # Errors
///
/// Same contract as [`correlate_pairs`].
pub fn correlate_pairs_serial(
    tasks: &[CorrelationTask],
    params: &CorrelationParams,
) -> Result<Vec<PairCorrelation>> {
    tasks.iter().map(|task| correlate_task(task, params)).collect()
}

fn correlate_task(task: &CorrelationTask, params: &CorrelationParams) -> Result<PairCorrelation> {
    let measures = match params.thresholds {
        Some((lower, upper)) => pearson::thresholded_correlate(
            &task.first.data,
            &task.second.data,
            lower,
            upper,
            params,
        )?,
        None => pearson::correlate(&task.first.data, &task.second.data, params)?,
    };

    Ok(PairCorrelation {
        pair: task.name(),
        measures,
    })
}
