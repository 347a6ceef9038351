//! Tests for the memoizing image cache

#[cfg(test)]
mod tests {
    use corrmaps::preprocess::{ChannelReduction, ImageCache, PreprocessParams};
    use std::fs;

    fn no_op_params() -> PreprocessParams {
        PreprocessParams {
            channel_reduction: ChannelReduction::MeanOfChannels,
            blur_sigma: 0.0,
            oval_mask: false,
        }
    }

    #[test]
    fn test_second_access_skips_the_loader() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("Ca.txt");
        fs::write(&path, "0;65535\n65535;0\n").expect("write matrix");

        let mut cache = ImageCache::new(no_op_params());

        let first = cache.get(&path).expect("load map");
        assert_eq!(cache.stats.misses, 1);
        assert_eq!(cache.stats.hits, 0);

        let second = cache.get(&path).expect("cached map");
        assert_eq!(cache.stats.misses, 1, "loader ran a second time");
        assert_eq!(cache.stats.hits, 1);

        assert_eq!(first.name, second.name);
        assert_eq!(first.data, second.data);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_distinct_paths_load_independently() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path_a = dir.path().join("Fe.txt");
        let path_b = dir.path().join("Cu.txt");
        fs::write(&path_a, "0;65535\n").expect("write matrix");
        fs::write(&path_b, "65535;0\n").expect("write matrix");

        let mut cache = ImageCache::new(no_op_params());
        let a = cache.get(&path_a).expect("load map");
        let b = cache.get(&path_b).expect("load map");

        assert_eq!(cache.stats.misses, 2);
        assert_eq!(a.name, "Fe");
        assert_eq!(b.name, "Cu");
        assert_ne!(a.data, b.data);
    }

    #[test]
    fn test_map_name_comes_from_file_stem() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("Pb-LA1.txt");
        fs::write(&path, "1;2\n").expect("write matrix");

        let mut cache = ImageCache::new(no_op_params());
        let map = cache.get(&path).expect("load map");
        assert_eq!(map.name, "Pb-LA1");
    }

    #[test]
    fn test_oval_mask_parameter_is_applied() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("Hg.txt");
        let row = "100;100;100;100;100;100;100;100\n";
        fs::write(&path, row.repeat(8)).expect("write matrix");

        let params = PreprocessParams {
            oval_mask: true,
            ..no_op_params()
        };
        let mut cache = ImageCache::new(params);
        let map = cache.get(&path).expect("load map");

        let corner = map.data.get((0, 0)).copied().unwrap_or(0.0);
        assert!(corner.is_nan(), "oval mask was not applied");
        let center = map.data.get((4, 4)).copied().unwrap_or(f64::NAN);
        assert!(center.is_finite());
    }

    #[test]
    fn test_load_failure_is_not_cached() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("missing.txt");

        let mut cache = ImageCache::new(no_op_params());
        assert!(cache.get(&path).is_err());
        assert!(cache.is_empty());

        // The file appears later; the next access must retry the load
        fs::write(&path, "1;2\n").expect("write matrix");
        assert!(cache.get(&path).is_ok());
    }
}
