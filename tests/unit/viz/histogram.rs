//! Tests for histogram binning and the per-pair figure

#[cfg(test)]
mod tests {
    use corrmaps::preprocess::ElementMap;
    use corrmaps::viz::histogram::{histogram, histogram2d, render_pair_histogram};
    use ndarray::Array2;

    #[test]
    fn test_histogram_counts_every_finite_value_once() {
        let grid = Array2::from_shape_vec((1, 6), vec![0.0, 0.05, 0.5, 0.5, 1.0, f64::NAN])
            .expect("test grid dimensions must match value count");

        let counts = histogram(&grid, 10);
        assert_eq!(counts.iter().sum::<usize>(), 5, "NaN must be skipped");

        assert_eq!(counts.first().copied().unwrap_or(0), 2, "0.0 and 0.05 share bin 0");
        assert_eq!(counts.get(5).copied().unwrap_or(0), 2, "two values at 0.5");
        assert_eq!(counts.get(9).copied().unwrap_or(0), 1, "1.0 lands in the last bin");
    }

    #[test]
    fn test_histogram_zero_bins_is_empty() {
        let grid = Array2::from_elem((2, 2), 0.5);
        assert!(histogram(&grid, 0).is_empty());
    }

    #[test]
    fn test_histogram2d_counts_jointly_finite_pixels() {
        let x = Array2::from_shape_vec((1, 4), vec![0.0, 0.9, f64::NAN, 0.5])
            .expect("test grid dimensions must match value count");
        let y = Array2::from_shape_vec((1, 4), vec![0.9, 0.0, 0.5, f64::NAN])
            .expect("test grid dimensions must match value count");

        let counts = histogram2d(&x, &y, 4);
        let total: f64 = counts.iter().sum();
        assert!(
            (total - 2.0).abs() < 1e-12,
            "only the two jointly finite pixels count, got {total}"
        );

        // (0.0, 0.9) -> bin (0, 3); (0.9, 0.0) -> bin (3, 0)
        assert!((counts.get((0, 3)).copied().unwrap_or(0.0) - 1.0).abs() < 1e-12);
        assert!((counts.get((3, 0)).copied().unwrap_or(0.0) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_pair_figure_is_written() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("Pb_Hg.png");

        let values: Vec<f64> = (0..64).map(|i| i as f64 / 63.0).collect();
        let x = ElementMap::new(
            "Pb",
            Array2::from_shape_vec((8, 8), values.clone())
                .expect("test grid dimensions must match value count"),
        );
        let y = ElementMap::new(
            "Hg",
            Array2::from_shape_vec((8, 8), values)
                .expect("test grid dimensions must match value count"),
        );

        render_pair_histogram(&x, &y, 16, &path).expect("render figure");
        let metadata = std::fs::metadata(&path).expect("figure exists");
        assert!(metadata.len() > 0);
    }
}
