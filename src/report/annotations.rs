//! External pair annotations
//!
//! Researchers maintain a side table of known facts about specific pairs
//! (physical overlaps, duplicate acquisitions, shared pigments). It is read
//! as CSV keyed by canonical pair name and left-merged into the result
//! table; pairs without an entry simply stay unannotated.

use crate::io::error::{CorrError, Result};
use crate::report::records::PairFlags;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

#[derive(Debug, Deserialize)]
struct AnnotationRow {
    pair: String,
    #[serde(default)]
    overlap: Option<u8>,
    #[serde(default)]
    identity: Option<u8>,
    #[serde(default)]
    pigment: Option<u8>,
}

/// Annotation flags keyed by canonical pair name
#[derive(Debug, Default)]
pub struct AnnotationSet {
    flags: HashMap<String, PairFlags>,
}

impl AnnotationSet {
    /// Read an annotation table from a CSV file
    ///
    /// Expected header: `pair,overlap,identity,pigment`. Flag cells hold
    /// 0/1 or are left empty; empty cells stay unset rather than false.
    ///
    /// # Errors
    ///
    /// Returns `AnnotationRead` when the file cannot be opened or a row
    /// cannot be parsed.
    pub fn from_csv(path: &Path) -> Result<Self> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| CorrError::AnnotationRead {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut flags = HashMap::new();
        for result in reader.deserialize() {
            let row: AnnotationRow = result.map_err(|e| CorrError::AnnotationRead {
                path: path.to_path_buf(),
                source: e,
            })?;
            flags.insert(
                row.pair,
                PairFlags {
                    overlap: row.overlap.map(|v| v != 0),
                    identity: row.identity.map(|v| v != 0),
                    pigment: row.pigment.map(|v| v != 0),
                },
            );
        }

        Ok(Self { flags })
    }

    /// Insert or replace the flags for one pair
    pub fn insert(&mut self, pair: impl Into<String>, flags: PairFlags) {
        self.flags.insert(pair.into(), flags);
    }

    /// Look up the flags for a pair by exact key match
    pub fn get(&self, pair: &str) -> Option<PairFlags> {
        self.flags.get(pair).copied()
    }

    /// Number of annotated pairs
    pub fn len(&self) -> usize {
        self.flags.len()
    }

    /// Whether the set holds no annotations
    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }
}
