//! Tests for spreadsheet export

#[cfg(test)]
mod tests {
    use corrmaps::report::annotations::AnnotationSet;
    use corrmaps::report::export::export_xlsx;
    use corrmaps::report::records::{
        CorrelationRecord, PairFlags, ResultTable, SortDirection, SortField,
    };

    fn record(pair: &str, r: f64) -> CorrelationRecord {
        CorrelationRecord {
            pair: pair.to_string(),
            r,
            r2: r * r,
            slope: 0.5,
            intercept: 0.01,
            flags: PairFlags::default(),
        }
    }

    fn five_pair_table() -> ResultTable {
        ResultTable::from_records(vec![
            record("Pb Hg", 0.95),
            record("Pb Fe", 0.80),
            record("Hg Fe", 0.60),
            record("Pb Cu", 0.40),
            record("Hg Cu", f64::NAN),
        ])
    }

    #[test]
    fn test_export_writes_a_workbook() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("correlations.xlsx");

        let table = five_pair_table();
        export_xlsx(&table, &path).expect("export workbook");

        let metadata = std::fs::metadata(&path).expect("workbook exists");
        assert!(metadata.len() > 0, "workbook must not be empty");
    }

    #[test]
    fn test_empty_table_still_exports() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("empty.xlsx");

        export_xlsx(&ResultTable::default(), &path).expect("export workbook");
        assert!(path.exists());
    }

    // Exactly the overlap-flagged rows, in table sort order, make up the
    // overlaps sheet
    #[test]
    fn test_overlap_subset_contains_exactly_flagged_rows() {
        let mut table = five_pair_table();
        let mut annotations = AnnotationSet::default();
        for pair in ["Hg Fe", "Pb Cu"] {
            annotations.insert(
                pair,
                PairFlags {
                    overlap: Some(true),
                    ..PairFlags::default()
                },
            );
        }
        table.merge_annotations(&annotations);
        table.sort_by(SortField::R, SortDirection::Descending);

        let subsets = table.flag_subsets();
        let overlaps = subsets
            .iter()
            .find(|(name, _)| *name == "overlaps")
            .map(|(_, t)| t.clone())
            .expect("overlaps subset exists");

        let pairs: Vec<&str> = overlaps.records().iter().map(|r| r.pair.as_str()).collect();
        assert_eq!(pairs, vec!["Hg Fe", "Pb Cu"]);

        // The full export including the subset sheets must still succeed
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("flagged.xlsx");
        export_xlsx(&table, &path).expect("export workbook");
        assert!(path.exists());
    }

    #[test]
    fn test_export_into_missing_directory_fails() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("no_such_dir").join("correlations.xlsx");

        assert!(export_xlsx(&five_pair_table(), &path).is_err());
    }
}
