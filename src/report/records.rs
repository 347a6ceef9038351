//! Correlation records and the sortable result table

use crate::correlation::PairCorrelation;
use crate::report::annotations::AnnotationSet;
use std::cmp::Ordering;

/// External annotation flags for one pair
///
/// `None` means the pair was absent from the annotation source, which is
/// expected for most pairs and never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PairFlags {
    /// Known physical overlap of two paint regions
    pub overlap: Option<bool>,
    /// Same signal acquired twice (e.g. two emission lines of one element)
    pub identity: Option<bool>,
    /// Both maps attributed to the same pigment
    pub pigment: Option<bool>,
}

/// One row of the result table
#[derive(Debug, Clone)]
pub struct CorrelationRecord {
    /// Canonical pair key
    pub pair: String,
    /// Pearson correlation coefficient, NaN when undefined
    pub r: f64,
    /// Coefficient of determination
    pub r2: f64,
    /// Regression slope, NaN when regression was skipped or degenerate
    pub slope: f64,
    /// Regression intercept, NaN when regression was skipped or degenerate
    pub intercept: f64,
    /// Merged external annotations
    pub flags: PairFlags,
}

/// Sortable field of a correlation record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    /// Canonical pair key (lexicographic)
    Pair,
    /// Pearson r
    R,
    /// r squared
    R2,
    /// Regression slope
    Slope,
    /// Regression intercept
    Intercept,
}

/// Sort direction for table ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest first
    Ascending,
    /// Largest first
    Descending,
}

/// Ordered collection of all correlation records for one run
///
/// Built once from the full pair set; afterwards only the sort order
/// changes and subsets are derived. Undefined values stay in the table as
/// NaN markers rather than dropping rows.
#[derive(Debug, Clone, Default)]
pub struct ResultTable {
    records: Vec<CorrelationRecord>,
}

impl ResultTable {
    /// Build the table from per-pair results, preserving their order
    pub fn from_correlations(correlations: Vec<PairCorrelation>) -> Self {
        let records = correlations
            .into_iter()
            .map(|c| CorrelationRecord {
                pair: c.pair,
                r: c.measures.r,
                r2: c.measures.r2,
                slope: c.measures.regression.slope(),
                intercept: c.measures.regression.intercept(),
                flags: PairFlags::default(),
            })
            .collect();

        Self { records }
    }

    /// Build a table directly from records (subset construction, tests)
    pub fn from_records(records: Vec<CorrelationRecord>) -> Self {
        Self { records }
    }

    /// All records in current table order
    pub fn records(&self) -> &[CorrelationRecord] {
        &self.records
    }

    /// Number of rows
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the table has no rows
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Stable sort by one field; NaN values sort last in either direction
    pub fn sort_by(&mut self, field: SortField, direction: SortDirection) {
        self.records.sort_by(|a, b| match field {
            SortField::Pair => {
                let ord = a.pair.cmp(&b.pair);
                match direction {
                    SortDirection::Ascending => ord,
                    SortDirection::Descending => ord.reverse(),
                }
            }
            SortField::R => compare_values(a.r, b.r, direction),
            SortField::R2 => compare_values(a.r2, b.r2, direction),
            SortField::Slope => compare_values(a.slope, b.slope, direction),
            SortField::Intercept => compare_values(a.intercept, b.intercept, direction),
        });
    }

    /// Left-merge annotation flags by exact pair key
    ///
    /// Pairs absent from the annotation source keep their default (unset)
    /// flags.
    pub fn merge_annotations(&mut self, annotations: &AnnotationSet) {
        for record in &mut self.records {
            if let Some(flags) = annotations.get(&record.pair) {
                record.flags = flags;
            }
        }
    }

    /// Derive a subset of rows matching the predicate, preserving order
    pub fn subset<F>(&self, predicate: F) -> Self
    where
        F: Fn(&CorrelationRecord) -> bool,
    {
        Self {
            records: self
                .records
                .iter()
                .filter(|r| predicate(r))
                .cloned()
                .collect(),
        }
    }

    /// The named flag subsets exported alongside the full table
    ///
    /// Subsets may overlap; a pair can be both an overlap and same-pigment.
    pub fn flag_subsets(&self) -> Vec<(&'static str, Self)> {
        vec![
            ("identity", self.subset(|r| r.flags.identity == Some(true))),
            ("overlaps", self.subset(|r| r.flags.overlap == Some(true))),
            ("pigment", self.subset(|r| r.flags.pigment == Some(true))),
        ]
    }
}

// NaN ordering is pinned here so ascending and descending both keep
// undefined pairs at the bottom of the report
fn compare_values(a: f64, b: f64, direction: SortDirection) -> Ordering {
    match (a.is_nan(), b.is_nan()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.partial_cmp(&b).unwrap_or(Ordering::Equal);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}
