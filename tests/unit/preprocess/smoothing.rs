//! Tests for separable Gaussian smoothing

#[cfg(test)]
mod tests {
    use corrmaps::preprocess::smoothing::gaussian_blur;
    use ndarray::Array2;

    #[test]
    fn test_zero_sigma_is_a_no_op() {
        let values: Vec<f64> = (0..9).map(|i| i as f64 / 8.0).collect();
        let input = Array2::from_shape_vec((3, 3), values)
            .expect("test grid dimensions must match value count");

        let output = gaussian_blur(&input, 0.0);
        assert_eq!(output, input);

        let negative = gaussian_blur(&input, -1.0);
        assert_eq!(negative, input);
    }

    #[test]
    fn test_uniform_grid_is_preserved() {
        let input = Array2::from_elem((8, 8), 0.42);
        let output = gaussian_blur(&input, 1.5);

        // Reflection padding keeps a constant field constant
        for &value in &output {
            assert!((value - 0.42).abs() < 1e-9, "uniform value drifted to {value}");
        }
    }

    #[test]
    fn test_impulse_mass_is_preserved() {
        let mut input = Array2::zeros((11, 11));
        if let Some(center) = input.get_mut((5, 5)) {
            *center = 1.0;
        }

        let output = gaussian_blur(&input, 1.0);
        let total: f64 = output.iter().sum();
        assert!(
            (total - 1.0).abs() < 1e-6,
            "blur should redistribute, not create or destroy, mass; total = {total}"
        );

        let peak = output.get((5, 5)).copied().unwrap_or(0.0);
        assert!(peak < 1.0, "impulse must spread");
        assert!(peak > 0.0);
    }

    #[test]
    fn test_impulse_response_is_symmetric() {
        let mut input = Array2::zeros((9, 9));
        if let Some(center) = input.get_mut((4, 4)) {
            *center = 1.0;
        }

        let output = gaussian_blur(&input, 1.2);

        let left = output.get((4, 2)).copied().unwrap_or(-1.0);
        let right = output.get((4, 6)).copied().unwrap_or(-2.0);
        let up = output.get((2, 4)).copied().unwrap_or(-3.0);
        let down = output.get((6, 4)).copied().unwrap_or(-4.0);

        assert!((left - right).abs() < 1e-12);
        assert!((up - down).abs() < 1e-12);
        assert!((left - up).abs() < 1e-12, "blur must be isotropic");
    }

    #[test]
    fn test_stronger_sigma_flattens_more() {
        let mut input = Array2::zeros((15, 15));
        if let Some(center) = input.get_mut((7, 7)) {
            *center = 1.0;
        }

        let soft = gaussian_blur(&input, 0.5);
        let strong = gaussian_blur(&input, 2.0);

        let soft_peak = soft.get((7, 7)).copied().unwrap_or(0.0);
        let strong_peak = strong.get((7, 7)).copied().unwrap_or(0.0);
        assert!(strong_peak < soft_peak);
    }
}
