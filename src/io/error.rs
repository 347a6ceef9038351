//! Error types for correlation runs

use std::fmt;
use std::path::PathBuf;

/// Main error type for all correlation-run operations
#[derive(Debug)]
pub enum CorrError {
    /// Failed to decode a raster image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image decoding error
        source: image::ImageError,
    },

    /// Failed to parse a delimited numeric text matrix
    MatrixParse {
        /// Path to the text file
        path: PathBuf,
        /// One-based line number where parsing failed (0 = whole file)
        line: usize,
        /// Description of what was wrong with the data
        reason: String,
    },

    /// Maps in the set do not share dimensions
    ///
    /// All maps participating in one run must be co-registered, so a
    /// mismatch is detected before any correlation starts.
    ShapeMismatch {
        /// Name of the offending map
        name: String,
        /// Its dimensions (rows, cols)
        dimensions: (usize, usize),
        /// Name of the map that set the expected shape
        expected_name: String,
        /// The expected dimensions (rows, cols)
        expected: (usize, usize),
    },

    /// Run parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to read the external annotation table
    AnnotationRead {
        /// Path to the annotation file
        path: PathBuf,
        /// Underlying CSV error
        source: csv::Error,
    },

    /// Failed to write the spreadsheet report
    TableExport {
        /// Path where the export was attempted
        path: PathBuf,
        /// Underlying spreadsheet error
        source: rust_xlsxwriter::XlsxError,
    },

    /// Failed to render a figure
    Render {
        /// Path where the figure was being written
        path: PathBuf,
        /// Description of the drawing failure
        reason: String,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for CorrError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::MatrixParse { path, line, reason } => {
                write!(
                    f,
                    "Failed to parse matrix '{}' at line {line}: {reason}",
                    path.display()
                )
            }
            Self::ShapeMismatch {
                name,
                dimensions,
                expected_name,
                expected,
            } => {
                write!(
                    f,
                    "Map '{name}' is {}x{} but '{expected_name}' is {}x{}; \
                     all maps in a run must share dimensions",
                    dimensions.0, dimensions.1, expected.0, expected.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::AnnotationRead { path, source } => {
                write!(
                    f,
                    "Failed to read annotations '{}': {source}",
                    path.display()
                )
            }
            Self::TableExport { path, source } => {
                write!(
                    f,
                    "Failed to export table to '{}': {source}",
                    path.display()
                )
            }
            Self::Render { path, reason } => {
                write!(f, "Failed to render '{}': {reason}", path.display())
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for CorrError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } => Some(source),
            Self::AnnotationRead { source, .. } => Some(source),
            Self::TableExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for correlation-run results
pub type Result<T> = std::result::Result<T, CorrError>;

impl From<std::io::Error> for CorrError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> CorrError {
    CorrError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a render error from any drawing backend failure
pub fn render_error(path: impl Into<PathBuf>, reason: &impl ToString) -> CorrError {
    CorrError::Render {
        path: path.into(),
        reason: reason.to_string(),
    }
}
