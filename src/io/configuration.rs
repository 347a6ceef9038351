//! Run parameter defaults and report styling constants

/// Default Gaussian smoothing strength in pixels
pub const DEFAULT_BLUR_SIGMA: f64 = 2.0;

/// Default minimum r-squared below which regression is skipped
pub const DEFAULT_MIN_R2: f64 = 0.1;

/// Default lower value threshold for background exclusion
pub const DEFAULT_LOWER_THRESHOLD: f64 = 0.1;

/// Default upper value threshold for saturation exclusion
pub const DEFAULT_UPPER_THRESHOLD: f64 = 0.95;

/// Default histogram bin count for figures
pub const DEFAULT_HISTOGRAM_BINS: usize = 50;

/// Default input file extension
pub const DEFAULT_EXTENSION: &str = "png";

/// Bit depth assumed for delimited text matrices
pub const TEXT_MATRIX_BIT_DEPTH: u32 = 16;

/// Cell delimiter in text matrices
pub const TEXT_MATRIX_DELIMITER: char = ';';

/// File stems excluded from discovery (previews, mosaics, parameter dumps)
pub const EXCLUDED_STEMS: &[&str] = &[
    "VIS",
    "Video 1",
    "mosaic",
    "parameters",
    "p",
    "Rh",
    "Rh-KA1",
    "Rh-LA1",
    "U",
];

/// File name of the spreadsheet report
pub const REPORT_FILE_NAME: &str = "correlations.xlsx";

/// File name of the matrix figure
pub const MATRIX_FILE_NAME: &str = "corr_matrix.png";

/// Directory name for per-pair 2D histogram figures
pub const PAIR_HISTOGRAM_DIR: &str = "hist2d";

/// Default file name of the annotation table
pub const ANNOTATION_FILE_NAME: &str = "correlations_comments.csv";

// Spreadsheet styling
/// Width of the pair-name column
pub const PAIR_COLUMN_WIDTH: f64 = 20.0;
/// Width of the numeric columns
pub const NUMERIC_COLUMN_WIDTH: f64 = 10.0;
/// Number of numeric columns given the narrow width
pub const NUMERIC_COLUMN_SPAN: u16 = 20;
/// r value mapped to the low scale color
pub const SCALE_LOW_VALUE: f64 = 0.4;
/// r value mapped to the mid scale color
pub const SCALE_MID_VALUE: f64 = 0.9;
/// r value mapped to the high scale color
pub const SCALE_HIGH_VALUE: f64 = 1.0;
/// Low scale color (white)
pub const SCALE_LOW_COLOR: u32 = 0xFF_FF_FF;
/// Mid scale color (yellow)
pub const SCALE_MID_COLOR: u32 = 0xFF_FF_99;
/// High scale color (red)
pub const SCALE_HIGH_COLOR: u32 = 0xFF_99_99;

// Figure geometry
/// Edge length of one matrix panel in pixels
pub const MATRIX_PANEL_SIZE: u32 = 240;
/// Margin around the matrix grid reserved for row/column headers
pub const MATRIX_HEADER_MARGIN: u32 = 60;
/// Edge length of a standalone per-pair histogram figure in pixels
pub const PAIR_HISTOGRAM_SIZE: u32 = 800;

// Progress bar display settings
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
