//! Masked Pearson correlation with conditional linear regression

use crate::io::configuration::DEFAULT_MIN_R2;
use crate::io::error::{CorrError, Result};
use crate::preprocess::mask;
use ndarray::Array2;

/// Parameters controlling one correlation computation
#[derive(Debug, Clone, Copy)]
pub struct CorrelationParams {
    /// Minimum r-squared below which regression is skipped
    ///
    /// Fitting a line to an uncorrelated pair is wasted work, not a
    /// statistical necessity; r and r-squared are always computed.
    pub min_r2: f64,
    /// Optional (lower, upper) value thresholds masking background and
    /// saturated pixels before correlation
    pub thresholds: Option<(f64, f64)>,
}

impl Default for CorrelationParams {
    fn default() -> Self {
        Self {
            min_r2: DEFAULT_MIN_R2,
            thresholds: None,
        }
    }
}

/// Outcome of the conditional regression step
///
/// A degenerate fit is recovered locally: the pair keeps its r value and
/// reports undefined coefficients, and every other pair is unaffected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Regression {
    /// Least-squares fit of the first map against the second (x = m*y + b),
    /// oriented so the slope reads as the ratio of element one to element two
    Fitted {
        /// Regression slope m
        slope: f64,
        /// Regression intercept b
        intercept: f64,
    },
    /// Skipped because r-squared fell below the configured minimum
    BelowThreshold,
    /// Input had no spread or too few valid pixels to fit
    Degenerate,
}

impl Regression {
    /// Slope as a plain float, NaN when no fit was produced
    pub const fn slope(&self) -> f64 {
        match self {
            Self::Fitted { slope, .. } => *slope,
            _ => f64::NAN,
        }
    }

    /// Intercept as a plain float, NaN when no fit was produced
    pub const fn intercept(&self) -> f64 {
        match self {
            Self::Fitted { intercept, .. } => *intercept,
            _ => f64::NAN,
        }
    }
}

/// Correlation measures for one map pair
#[derive(Debug, Clone, Copy)]
pub struct Measures {
    /// Pearson correlation coefficient, NaN when undefined
    pub r: f64,
    /// Coefficient of determination (r squared)
    pub r2: f64,
    /// Conditional regression outcome
    pub regression: Regression,
}

/// Correlate two equally-shaped grids over their jointly valid pixels
///
/// A pixel that is NaN in either grid is excluded from both, combining the
/// two missing-value masks. Pearson r is NaN when fewer than two valid
/// pixels remain or either side has zero variance.
///
/// # Errors
///
/// Returns `ShapeMismatch` when the grids differ in dimensions. Shape
/// agreement is also verified run-wide before any pair is computed; this
/// check is the per-pair backstop.
pub fn correlate(x: &Array2<f64>, y: &Array2<f64>, params: &CorrelationParams) -> Result<Measures> {
    if x.dim() != y.dim() {
        return Err(CorrError::ShapeMismatch {
            name: "second input".to_string(),
            dimensions: y.dim(),
            expected_name: "first input".to_string(),
            expected: x.dim(),
        });
    }

    let mut n = 0.0_f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xx = 0.0;
    let mut sum_yy = 0.0;
    let mut sum_xy = 0.0;

    for (&a, &b) in x.iter().zip(y.iter()) {
        if a.is_finite() && b.is_finite() {
            n += 1.0;
            sum_x += a;
            sum_y += b;
            sum_xx += a * a;
            sum_yy += b * b;
            sum_xy += a * b;
        }
    }

    let cov = n.mul_add(sum_xy, -(sum_x * sum_y));
    let var_x = n.mul_add(sum_xx, -(sum_x * sum_x));
    let var_y = n.mul_add(sum_yy, -(sum_y * sum_y));

    let r = if n < 2.0 || var_x <= 0.0 || var_y <= 0.0 {
        f64::NAN
    } else {
        cov / (var_x * var_y).sqrt()
    };
    let r2 = r * r;

    let regression = if !r.is_finite() {
        log::warn!("degenerate correlation input ({n} valid pixels), coefficients undefined");
        Regression::Degenerate
    } else if r2 < params.min_r2 {
        Regression::BelowThreshold
    } else if var_y > 0.0 {
        let slope = cov / var_y;
        let intercept = slope.mul_add(-sum_y, sum_x) / n;
        Regression::Fitted { slope, intercept }
    } else {
        log::warn!("regression failed on zero-variance input, coefficients undefined");
        Regression::Degenerate
    };

    Ok(Measures { r, r2, regression })
}

/// Correlate after masking out-of-range values in both grids
///
/// Pixels at or below `lower` or at or above `upper` are treated as
/// background/saturation and removed from copies of the inputs before
/// delegating to [`correlate`].
///
/// # Errors
///
/// Same contract as [`correlate`].
pub fn thresholded_correlate(
    x: &Array2<f64>,
    y: &Array2<f64>,
    lower: f64,
    upper: f64,
    params: &CorrelationParams,
) -> Result<Measures> {
    let mut masked_x = x.clone();
    let mut masked_y = y.clone();
    mask::apply_threshold_mask(&mut masked_x, lower, upper);
    mask::apply_threshold_mask(&mut masked_y, lower, upper);
    correlate(&masked_x, &masked_y, params)
}
