//! Tests for masked Pearson correlation and the regression outcome

#[cfg(test)]
mod tests {
    use corrmaps::correlation::pearson::{
        CorrelationParams, Regression, correlate, thresholded_correlate,
    };
    use ndarray::Array2;

    fn grid(values: &[f64]) -> Array2<f64> {
        Array2::from_shape_vec((1, values.len()), values.to_vec())
            .expect("test grid dimensions must match value count")
    }

    fn loose_params() -> CorrelationParams {
        CorrelationParams {
            min_r2: 0.0,
            thresholds: None,
        }
    }

    #[test]
    fn test_perfect_linear_relation() {
        let x = grid(&[0.1, 0.2, 0.3, 0.4]);
        let y = grid(&[0.2, 0.4, 0.6, 0.8]);

        let measures = correlate(&x, &y, &loose_params()).expect("equal shapes");
        assert!((measures.r - 1.0).abs() < 1e-12);

        // x = 0.5 * y exactly, so the fit of x on y recovers that ratio
        match measures.regression {
            Regression::Fitted { slope, intercept } => {
                assert!((slope - 0.5).abs() < 1e-12, "slope was {slope}");
                assert!(intercept.abs() < 1e-12, "intercept was {intercept}");
            }
            other => unreachable!("expected a fit, got {other:?}"),
        }
    }

    #[test]
    fn test_perfect_anticorrelation() {
        let x = grid(&[0.1, 0.2, 0.3, 0.4]);
        let y = grid(&[0.8, 0.6, 0.4, 0.2]);

        let measures = correlate(&x, &y, &loose_params()).expect("equal shapes");
        assert!((measures.r + 1.0).abs() < 1e-12);
        assert!((measures.r2 - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_masked_pixels_are_excluded_from_both_inputs() {
        // The NaN in x removes index 2 from BOTH samples; what remains of y
        // is exactly proportional to x again
        let x = grid(&[0.1, 0.2, f64::NAN, 0.4]);
        let y = grid(&[0.2, 0.4, 0.9, 0.8]);

        let measures = correlate(&x, &y, &loose_params()).expect("equal shapes");
        assert!(
            (measures.r - 1.0).abs() < 1e-12,
            "masked pixel leaked into the statistics, r = {}",
            measures.r
        );
    }

    #[test]
    fn test_combined_mask_uses_union_of_missing_pixels() {
        let x = grid(&[f64::NAN, 0.2, 0.3, 0.4, 0.5]);
        let y = grid(&[0.1, 0.4, f64::NAN, 0.8, 1.0]);

        // Valid set is indexes 1, 3, 4 where y = 2x
        let measures = correlate(&x, &y, &loose_params()).expect("equal shapes");
        assert!((measures.r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_below_min_r2_skips_regression_only() {
        let x = grid(&[0.1, 0.9, 0.2, 0.8, 0.15, 0.85]);
        let y = grid(&[0.5, 0.52, 0.49, 0.51, 0.5, 0.5]);

        let params = CorrelationParams {
            min_r2: 0.99,
            thresholds: None,
        };
        let measures = correlate(&x, &y, &params).expect("equal shapes");

        assert!(measures.r.is_finite());
        assert!(measures.r2.is_finite());
        assert_eq!(measures.regression, Regression::BelowThreshold);
    }

    #[test]
    fn test_degenerate_input_reports_undefined_coefficients() {
        let x = grid(&[0.5, 0.5, 0.5, 0.5]);
        let y = grid(&[0.1, 0.2, 0.3, 0.4]);

        let measures = correlate(&x, &y, &loose_params()).expect("equal shapes");
        assert!(measures.r.is_nan());
        assert!(measures.r2.is_nan());
        assert_eq!(measures.regression, Regression::Degenerate);
        assert!(measures.regression.slope().is_nan());
        assert!(measures.regression.intercept().is_nan());
    }

    #[test]
    fn test_too_few_valid_pixels_is_degenerate() {
        let x = grid(&[0.5, f64::NAN, f64::NAN]);
        let y = grid(&[0.1, 0.2, 0.3]);

        let measures = correlate(&x, &y, &loose_params()).expect("equal shapes");
        assert!(measures.r.is_nan());
        assert_eq!(measures.regression, Regression::Degenerate);
    }

    #[test]
    fn test_thresholded_masks_both_bounds() {
        // Index 0 is background in x, index 5 is saturated in y; the
        // surviving interior is perfectly correlated
        let x = grid(&[0.0, 0.3, 0.4, 0.5, 0.6, 0.7]);
        let y = grid(&[0.9, 0.3, 0.4, 0.5, 0.6, 1.0]);

        let measures =
            thresholded_correlate(&x, &y, 0.1, 0.95, &loose_params()).expect("equal shapes");
        assert!((measures.r - 1.0).abs() < 1e-12, "r = {}", measures.r);
    }

    #[test]
    fn test_thresholded_leaves_inputs_untouched() {
        let x = grid(&[0.0, 0.5, 1.0]);
        let y = grid(&[0.2, 0.5, 0.9]);

        let _ = thresholded_correlate(&x, &y, 0.1, 0.95, &loose_params());
        assert!(x.iter().all(|v| v.is_finite()), "input x was mutated");
        assert!(y.iter().all(|v| v.is_finite()), "input y was mutated");
    }

    #[test]
    fn test_shape_mismatch_is_an_error() {
        let x = grid(&[0.1, 0.2, 0.3]);
        let y = Array2::from_elem((3, 1), 0.5);

        assert!(correlate(&x, &y, &loose_params()).is_err());
    }
}
