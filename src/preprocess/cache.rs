//! Memoizing cache for loaded and preprocessed maps
//!
//! Repeated pairwise access touches every map N-1 times; the cache makes
//! each file hit the loader and filters exactly once per run. The cache is
//! owned by the run that created it and is never shared across worker
//! threads; workers receive the preprocessed grids instead.

use crate::io::configuration::DEFAULT_BLUR_SIGMA;
use crate::io::error::Result;
use crate::preprocess::loader::{self, ChannelReduction, ElementMap};
use crate::preprocess::{mask, smoothing};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Immutable preprocessing configuration, fixed for one run
///
/// The cache key is (source path, these parameters); since the parameters
/// cannot change mid-run, the map alone is keyed by path.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreprocessParams {
    /// How multi-channel images reduce to one intensity channel
    pub channel_reduction: ChannelReduction,
    /// Gaussian smoothing strength in pixels (0 disables smoothing)
    pub blur_sigma: f64,
    /// Whether the inscribed oval region mask is applied
    pub oval_mask: bool,
}

impl Default for PreprocessParams {
    fn default() -> Self {
        Self {
            channel_reduction: ChannelReduction::MeanOfChannels,
            blur_sigma: DEFAULT_BLUR_SIGMA,
            oval_mask: false,
        }
    }
}

/// Performance metrics for cache effectiveness
#[derive(Default, Debug)]
pub struct CacheStats {
    /// Number of cache hits
    pub hits: usize,
    /// Number of cache misses (loader invocations)
    pub misses: usize,
}

/// Process-local mapping from source path to preprocessed map
///
/// Grows monotonically within a run, no eviction; the sets under analysis
/// are at most a few hundred maps and fit in memory by design.
pub struct ImageCache {
    params: PreprocessParams,
    cached: HashMap<PathBuf, Arc<ElementMap>>,

    /// Cache performance statistics
    pub stats: CacheStats,
}

impl ImageCache {
    /// Create an empty cache for the given preprocessing parameters
    pub fn new(params: PreprocessParams) -> Self {
        Self {
            params,
            cached: HashMap::new(),
            stats: CacheStats::default(),
        }
    }

    /// The preprocessing parameters this cache was built with
    pub const fn params(&self) -> &PreprocessParams {
        &self.params
    }

    /// Number of maps currently cached
    pub fn len(&self) -> usize {
        self.cached.len()
    }

    /// Whether the cache holds no maps yet
    pub fn is_empty(&self) -> bool {
        self.cached.is_empty()
    }

    /// Fetch the preprocessed map for a path, loading it on first access
    ///
    /// # Errors
    ///
    /// Returns the loader error if the file cannot be decoded; cached
    /// entries never fail.
    pub fn get(&mut self, path: &Path) -> Result<Arc<ElementMap>> {
        if let Some(found) = self.cached.get(path) {
            self.stats.hits += 1;
            return Ok(Arc::clone(found));
        }

        self.stats.misses += 1;
        let map = Arc::new(load_and_preprocess(path, self.params)?);
        self.cached.insert(path.to_path_buf(), Arc::clone(&map));
        Ok(map)
    }
}

fn load_and_preprocess(path: &Path, params: PreprocessParams) -> Result<ElementMap> {
    let name = path
        .file_stem()
        .map_or_else(|| path.display().to_string(), |s| s.to_string_lossy().into_owned());

    let raw = loader::load_image(path)?;
    let reduced = loader::reduce_channels(&raw, params.channel_reduction);
    let mut data = smoothing::gaussian_blur(&reduced, params.blur_sigma);
    if params.oval_mask {
        mask::apply_oval_mask(&mut data);
    }

    Ok(ElementMap::new(name, data))
}
