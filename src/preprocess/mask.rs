//! Region and value masks that mark excluded pixels as missing
//!
//! Masked pixels are set to `f64::NAN` and must be skipped by every
//! downstream statistic; they are never treated as zero intensity.

use ndarray::Array2;

/// Mask all pixels outside the ellipse inscribed in the grid bounds
///
/// Models the physical boundary of an oval specimen (a miniature painting)
/// so that mounting-board background does not enter the statistics.
pub fn apply_oval_mask(grid: &mut Array2<f64>) {
    let (rows, cols) = grid.dim();
    if rows == 0 || cols == 0 {
        return;
    }

    let center_row = (rows as f64 - 1.0) / 2.0;
    let center_col = (cols as f64 - 1.0) / 2.0;
    let radius_row = rows as f64 / 2.0;
    let radius_col = cols as f64 / 2.0;

    for ((i, j), value) in grid.indexed_iter_mut() {
        let dy = (i as f64 - center_row) / radius_row;
        let dx = (j as f64 - center_col) / radius_col;
        if dy * dy + dx * dx > 1.0 {
            *value = f64::NAN;
        }
    }
}

/// Mask pixels at or beyond the given value thresholds
///
/// Values at or below `lower` are background, values at or above `upper`
/// are detector saturation; both are excluded before correlation.
pub fn apply_threshold_mask(grid: &mut Array2<f64>, lower: f64, upper: f64) {
    for value in grid.iter_mut() {
        if *value <= lower || *value >= upper {
            *value = f64::NAN;
        }
    }
}

/// Fraction of pixels that remain unmasked
pub fn valid_fraction(grid: &Array2<f64>) -> f64 {
    if grid.is_empty() {
        return 0.0;
    }
    let valid = grid.iter().filter(|v| v.is_finite()).count();
    valid as f64 / grid.len() as f64
}
