//! Command-line interface and run orchestration
//!
//! Wires the whole pipeline together: discover map files, load and
//! preprocess them through one cache, correlate every unordered pair in
//! parallel, aggregate the table, merge annotations, and write the report
//! and figures. Every run parameter is an explicit flag with its default
//! in `io::configuration`; the correlation core never reads hidden state.

use crate::correlation::executor::{self, CorrelationTask};
use crate::correlation::pairs;
use crate::correlation::pearson::CorrelationParams;
use crate::io::configuration::{
    ANNOTATION_FILE_NAME, DEFAULT_BLUR_SIGMA, DEFAULT_EXTENSION, DEFAULT_HISTOGRAM_BINS,
    DEFAULT_LOWER_THRESHOLD, DEFAULT_MIN_R2, DEFAULT_UPPER_THRESHOLD, EXCLUDED_STEMS,
    MATRIX_FILE_NAME, PAIR_HISTOGRAM_DIR, REPORT_FILE_NAME,
};
use crate::io::error::{CorrError, Result, invalid_parameter};
use crate::io::progress::ProgressManager;
use crate::preprocess::{ChannelReduction, ElementMap, ImageCache, PreprocessParams};
use crate::report::annotations::AnnotationSet;
use crate::report::records::{ResultTable, SortDirection, SortField};
use crate::report::export;
use crate::viz::{histogram, matrix};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "corrmaps")]
#[command(
    author,
    version,
    about = "Pairwise Pearson correlation of co-registered element maps"
)]
/// Command-line arguments for a correlation run
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Directory of co-registered map files to correlate
    #[arg(value_name = "MAP_DIR")]
    pub target: PathBuf,

    /// Input file extension to select
    #[arg(short = 'e', long, default_value = DEFAULT_EXTENSION)]
    pub extension: String,

    /// Additional file stems to exclude from discovery
    #[arg(long = "exclude", value_name = "STEM")]
    pub excluded: Vec<String>,

    /// Gaussian smoothing strength in pixels (0 disables smoothing)
    #[arg(short = 's', long, default_value_t = DEFAULT_BLUR_SIGMA)]
    pub sigma: f64,

    /// Multi-channel reduction policy
    #[arg(long, default_value = "mean", value_parser = ["first", "mean"])]
    pub channel: String,

    /// Apply the inscribed oval region mask
    #[arg(short = 'm', long)]
    pub oval_mask: bool,

    /// Minimum r-squared below which regression is skipped
    #[arg(long, default_value_t = DEFAULT_MIN_R2)]
    pub min_r2: f64,

    /// Mask values at or below this threshold before correlating
    #[arg(long, value_name = "LOWER")]
    pub lower_threshold: Option<f64>,

    /// Mask values at or above this threshold before correlating
    #[arg(long, value_name = "UPPER")]
    pub upper_threshold: Option<f64>,

    /// Histogram bin count for figures
    #[arg(short = 'b', long, default_value_t = DEFAULT_HISTOGRAM_BINS)]
    pub bins: usize,

    /// Annotation CSV (defaults to correlations_comments.csv in MAP_DIR)
    #[arg(short = 'a', long, value_name = "FILE")]
    pub annotations: Option<PathBuf>,

    /// Output directory (defaults to MAP_DIR)
    #[arg(short = 'o', long, value_name = "DIR")]
    pub out_dir: Option<PathBuf>,

    /// Skip the matrix figure
    #[arg(long)]
    pub no_matrix: bool,

    /// Write one 2D-histogram figure per pair
    #[arg(short = 'p', long)]
    pub pair_histograms: bool,

    /// Correlate on a single thread instead of the worker pool
    #[arg(long)]
    pub serial: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Assemble the preprocessing parameters for this run
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` for a negative or non-finite sigma or a
    /// zero bin count.
    pub fn preprocess_params(&self) -> Result<PreprocessParams> {
        if !self.sigma.is_finite() || self.sigma < 0.0 {
            return Err(invalid_parameter(
                "sigma",
                &self.sigma,
                &"smoothing strength must be a non-negative number",
            ));
        }
        if self.bins == 0 {
            return Err(invalid_parameter(
                "bins",
                &self.bins,
                &"histogram bin count must be at least 1",
            ));
        }

        let channel_reduction = if self.channel == "first" {
            ChannelReduction::FirstChannel
        } else {
            ChannelReduction::MeanOfChannels
        };

        Ok(PreprocessParams {
            channel_reduction,
            blur_sigma: self.sigma,
            oval_mask: self.oval_mask,
        })
    }

    /// Assemble the correlation parameters for this run
    ///
    /// Value thresholds activate the thresholded correlation variant when
    /// either bound is given; the missing bound falls back to its default.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` when `min_r2` is outside [0,1] or the
    /// thresholds do not satisfy lower < upper.
    pub fn correlation_params(&self) -> Result<CorrelationParams> {
        if !(0.0..=1.0).contains(&self.min_r2) {
            return Err(invalid_parameter(
                "min-r2",
                &self.min_r2,
                &"must be within [0, 1]",
            ));
        }

        let thresholds = if self.lower_threshold.is_some() || self.upper_threshold.is_some() {
            let lower = self.lower_threshold.unwrap_or(DEFAULT_LOWER_THRESHOLD);
            let upper = self.upper_threshold.unwrap_or(DEFAULT_UPPER_THRESHOLD);
            if lower >= upper {
                return Err(invalid_parameter(
                    "lower-threshold",
                    &lower,
                    &format!("must be below the upper threshold {upper}"),
                ));
            }
            Some((lower, upper))
        } else {
            None
        };

        Ok(CorrelationParams {
            min_r2: self.min_r2,
            thresholds,
        })
    }
}

/// Discover map files in a directory by extension, skipping excluded stems
///
/// Entries are returned sorted by path so run order (and with it every
/// pair key and table row) is deterministic.
///
/// # Errors
///
/// Returns `InvalidParameter` when the target is not a directory and
/// `FileSystem` when it cannot be read.
pub fn discover_map_files(
    target: &Path,
    extension: &str,
    excluded_stems: &[String],
) -> Result<Vec<PathBuf>> {
    if !target.is_dir() {
        return Err(invalid_parameter(
            "target",
            &target.display(),
            &"must be a directory of co-registered map files",
        ));
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(target).map_err(|e| CorrError::FileSystem {
        path: target.to_path_buf(),
        operation: "read directory",
        source: e,
    })? {
        let path = entry
            .map_err(|e| CorrError::FileSystem {
                path: target.to_path_buf(),
                operation: "read directory entry",
                source: e,
            })?
            .path();

        let matches_extension = path.extension().and_then(|s| s.to_str()) == Some(extension);
        let stem = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default();

        if matches_extension && !excluded_stems.iter().any(|e| e == stem) {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Orchestrates one correlation run from discovery to report
pub struct RunProcessor {
    cli: Cli,
    progress: Option<ProgressManager>,
}

impl RunProcessor {
    /// Create a processor from parsed CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress = cli.should_show_progress().then(ProgressManager::new);
        Self { cli, progress }
    }

    /// Run the full pipeline
    ///
    /// # Errors
    ///
    /// Returns the first unrecoverable failure: unreadable or mis-shaped
    /// input maps, an unreadable explicit annotation file, or a failed
    /// export. Per-pair regression degeneracies do not fail the run; they
    /// surface as undefined values in the table.
    pub fn process(&mut self) -> Result<()> {
        let start = Instant::now();

        let files = self.collect_files()?;
        if files.is_empty() {
            log::warn!(
                "no '*.{}' map files found in {}",
                self.cli.extension,
                self.cli.target.display()
            );
            return Ok(());
        }
        log::info!(
            "correlating {} maps from {}",
            files.len(),
            self.cli.target.display()
        );

        let maps = self.load_maps(&files)?;
        let tasks: Vec<CorrelationTask> = pairs::unordered_pairs(&maps)
            .into_iter()
            .map(|(first, second)| CorrelationTask { first, second })
            .collect();

        let params = self.cli.correlation_params()?;
        let correlations = self.run_correlations(&tasks, &params)?;

        let mut table = ResultTable::from_correlations(correlations.clone());
        table.sort_by(SortField::R, SortDirection::Descending);

        if let Some(annotations) = self.annotation_set()? {
            log::info!("merging {} pair annotations", annotations.len());
            table.merge_annotations(&annotations);
        }

        let out_dir = self
            .cli
            .out_dir
            .clone()
            .unwrap_or_else(|| self.cli.target.clone());
        std::fs::create_dir_all(&out_dir).map_err(|e| CorrError::FileSystem {
            path: out_dir.clone(),
            operation: "create output directory",
            source: e,
        })?;

        export::export_xlsx(&table, &out_dir.join(REPORT_FILE_NAME))?;

        if !self.cli.no_matrix {
            matrix::render_matrix(
                &maps,
                &correlations,
                self.cli.bins,
                &out_dir.join(MATRIX_FILE_NAME),
            )?;
        }

        if self.cli.pair_histograms {
            self.render_pair_histograms(&tasks, &out_dir)?;
        }

        log::info!(
            "correlated {} pairs in {:.2} s",
            tasks.len(),
            start.elapsed().as_secs_f64()
        );
        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let mut excluded: Vec<String> =
            EXCLUDED_STEMS.iter().map(|s| (*s).to_string()).collect();
        excluded.extend(self.cli.excluded.iter().cloned());

        discover_map_files(&self.cli.target, &self.cli.extension, &excluded)
    }

    // Loads through one cache and verifies the co-registration precondition
    // before any pair work starts
    fn load_maps(&mut self, files: &[PathBuf]) -> Result<Vec<Arc<ElementMap>>> {
        if let Some(pm) = self.progress.as_mut() {
            pm.start_phase("Loading maps", files.len());
        }

        let mut cache = ImageCache::new(self.cli.preprocess_params()?);
        let mut maps: Vec<Arc<ElementMap>> = Vec::with_capacity(files.len());

        for path in files {
            let map = cache.get(path)?;
            if let Some(first) = maps.first() {
                if map.dimensions() != first.dimensions() {
                    return Err(CorrError::ShapeMismatch {
                        name: map.name.clone(),
                        dimensions: map.dimensions(),
                        expected_name: first.name.clone(),
                        expected: first.dimensions(),
                    });
                }
            }
            maps.push(map);
            if let Some(pm) = self.progress.as_ref() {
                pm.tick();
            }
        }

        if let Some(pm) = self.progress.as_mut() {
            pm.finish();
        }
        Ok(maps)
    }

    fn run_correlations(
        &mut self,
        tasks: &[CorrelationTask],
        params: &CorrelationParams,
    ) -> Result<Vec<executor::PairCorrelation>> {
        if let Some(pm) = self.progress.as_mut() {
            pm.start_phase("Correlating pairs", tasks.len());
        }

        let results = {
            let progress = self.progress.as_ref();
            if self.cli.serial {
                executor::correlate_pairs_serial(tasks, params)
            } else {
                executor::correlate_pairs(tasks, params, || {
                    if let Some(pm) = progress {
                        pm.tick();
                    }
                })
            }
        }?;

        if let Some(pm) = self.progress.as_mut() {
            pm.finish();
        }
        Ok(results)
    }

    fn render_pair_histograms(&mut self, tasks: &[CorrelationTask], out_dir: &Path) -> Result<()> {
        let hist_dir = out_dir.join(PAIR_HISTOGRAM_DIR);
        std::fs::create_dir_all(&hist_dir).map_err(|e| CorrError::FileSystem {
            path: hist_dir.clone(),
            operation: "create histogram directory",
            source: e,
        })?;

        if let Some(pm) = self.progress.as_mut() {
            pm.start_phase("Pair histograms", tasks.len());
        }

        for task in tasks {
            let file = hist_dir.join(format!("{}_{}.png", task.first.name, task.second.name));
            histogram::render_pair_histogram(&task.first, &task.second, self.cli.bins, &file)?;
            if let Some(pm) = self.progress.as_ref() {
                pm.tick();
            }
        }

        if let Some(pm) = self.progress.as_mut() {
            pm.finish();
        }
        Ok(())
    }

    // Missing default annotation file is expected; an explicitly requested
    // one must exist
    fn annotation_set(&self) -> Result<Option<AnnotationSet>> {
        let (path, explicit) = match &self.cli.annotations {
            Some(given) => (given.clone(), true),
            None => (self.cli.target.join(ANNOTATION_FILE_NAME), false),
        };

        if !path.exists() {
            if explicit {
                return Err(CorrError::FileSystem {
                    path,
                    operation: "read annotations",
                    source: std::io::Error::new(
                        std::io::ErrorKind::NotFound,
                        "annotation file not found",
                    ),
                });
            }
            log::debug!("no annotation file at {}", path.display());
            return Ok(None);
        }

        AnnotationSet::from_csv(&path).map(Some)
    }
}
