//! Image preprocessing pipeline
//!
//! Turns source files into masked intensity grids ready for correlation:
//! decode, reduce to one channel, smooth, apply the region mask, cache.

/// Memoizing cache for loaded and preprocessed maps
pub mod cache;
/// Raster and text-matrix loading normalized to the unit interval
pub mod loader;
/// Region and value masks marking excluded pixels as missing
pub mod mask;
/// Separable Gaussian smoothing
pub mod smoothing;

pub use cache::{CacheStats, ImageCache, PreprocessParams};
pub use loader::{ChannelReduction, ElementMap};
