//! Tests for the correlation-matrix figure

#[cfg(test)]
mod tests {
    use corrmaps::correlation::executor::{CorrelationTask, correlate_pairs_serial};
    use corrmaps::correlation::pairs::unordered_pairs;
    use corrmaps::correlation::pearson::CorrelationParams;
    use corrmaps::preprocess::ElementMap;
    use corrmaps::viz::matrix::render_matrix;
    use ndarray::Array2;
    use std::sync::Arc;

    fn synthetic_maps() -> Vec<Arc<ElementMap>> {
        ["Pb", "Hg", "Fe"]
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let values: Vec<f64> = (0..36)
                    .map(|i| ((i * (index + 1)) % 7) as f64 / 6.0)
                    .collect();
                let data = Array2::from_shape_vec((6, 6), values)
                    .expect("test grid dimensions must match value count");
                Arc::new(ElementMap::new(*name, data))
            })
            .collect()
    }

    #[test]
    fn test_matrix_figure_is_written() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("corr_matrix.png");

        let maps = synthetic_maps();
        let tasks: Vec<CorrelationTask> = unordered_pairs(&maps)
            .into_iter()
            .map(|(first, second)| CorrelationTask { first, second })
            .collect();
        let correlations =
            correlate_pairs_serial(&tasks, &CorrelationParams::default()).expect("correlate");

        render_matrix(&maps, &correlations, 12, &path).expect("render figure");
        let metadata = std::fs::metadata(&path).expect("figure exists");
        assert!(metadata.len() > 0);
    }

    #[test]
    fn test_missing_correlations_are_recomputed() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("corr_matrix.png");

        // No precomputed results at all; the figure fills them in itself
        render_matrix(&synthetic_maps(), &[], 12, &path).expect("render figure");
        assert!(path.exists());
    }

    #[test]
    fn test_empty_map_set_renders_nothing() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("corr_matrix.png");

        render_matrix(&[], &[], 12, &path).expect("empty set is a no-op");
        assert!(!path.exists(), "no figure for an empty run");
    }
}
