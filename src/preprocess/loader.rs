//! Image and text-matrix loading normalized to the unit interval

use crate::io::configuration::{TEXT_MATRIX_BIT_DEPTH, TEXT_MATRIX_DELIMITER};
use crate::io::error::{CorrError, Result};
use image::DynamicImage;
use ndarray::{Array2, Array3, Axis};
use std::path::Path;

/// A named intensity grid produced by the preprocessing pipeline
///
/// Values are in [0,1]; `f64::NAN` marks pixels excluded by a mask.
#[derive(Debug, Clone)]
pub struct ElementMap {
    /// Identifier derived from the source file stem
    pub name: String,
    /// Intensity grid (rows, cols)
    pub data: Array2<f64>,
}

impl ElementMap {
    /// Create a map from a name and a grid
    pub fn new(name: impl Into<String>, data: Array2<f64>) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Grid dimensions as (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.data.dim()
    }
}

/// Policy for reducing multi-channel images to a single intensity channel
///
/// Different acquisition setups exported either grayscale-in-red or true
/// color previews, so both reductions are supported and the choice is an
/// explicit run parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelReduction {
    /// Take the first (red) channel only
    FirstChannel,
    /// Average the color channels (alpha ignored)
    MeanOfChannels,
}

/// Load a source file as a (rows, cols, channels) grid scaled to [0,1]
///
/// Files with the `txt` extension are parsed as delimited integer matrices
/// at a fixed bit depth; everything else is decoded as a raster image and
/// scaled by its native bit depth.
///
/// # Errors
///
/// Returns `MatrixParse` for malformed text matrices and `ImageLoad` for
/// undecodable rasters. Both are fatal for the run, since every map is
/// needed to build the full pair set.
pub fn load_image(path: &Path) -> Result<Array3<f64>> {
    if path.extension().and_then(|s| s.to_str()) == Some("txt") {
        load_text_matrix(path)
    } else {
        load_raster(path)
    }
}

fn load_raster(path: &Path) -> Result<Array3<f64>> {
    let img = image::open(path).map_err(|e| CorrError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;

    let sixteen_bit = matches!(
        img,
        DynamicImage::ImageLuma16(_)
            | DynamicImage::ImageLumaA16(_)
            | DynamicImage::ImageRgb16(_)
            | DynamicImage::ImageRgba16(_)
    );

    if sixteen_bit {
        Ok(pixel_grid(&img.to_rgba16()))
    } else {
        Ok(pixel_grid(&img.to_rgba8()))
    }
}

fn load_text_matrix(path: &Path) -> Result<Array3<f64>> {
    let contents = std::fs::read_to_string(path).map_err(|e| CorrError::FileSystem {
        path: path.to_path_buf(),
        operation: "read text matrix",
        source: e,
    })?;

    let scale = f64::from((1u32 << TEXT_MATRIX_BIT_DEPTH) - 1);
    let mut values: Vec<f64> = Vec::new();
    let mut cols = 0usize;
    let mut rows = 0usize;

    for (index, line) in contents.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let mut row_len = 0usize;
        for cell in line.split(TEXT_MATRIX_DELIMITER) {
            let value: u16 =
                cell.trim()
                    .parse()
                    .map_err(|e: std::num::ParseIntError| CorrError::MatrixParse {
                        path: path.to_path_buf(),
                        line: index + 1,
                        reason: format!("cell '{}': {e}", cell.trim()),
                    })?;
            values.push(f64::from(value) / scale);
            row_len += 1;
        }
        if rows == 0 {
            cols = row_len;
        } else if row_len != cols {
            return Err(CorrError::MatrixParse {
                path: path.to_path_buf(),
                line: index + 1,
                reason: format!("expected {cols} cells, found {row_len}"),
            });
        }
        rows += 1;
    }

    Array3::from_shape_vec((rows, cols, 1), values).map_err(|e| CorrError::MatrixParse {
        path: path.to_path_buf(),
        line: 0,
        reason: e.to_string(),
    })
}

/// Reduce a multi-channel grid to a single intensity channel
///
/// Single-channel input is passed through unchanged regardless of policy.
pub fn reduce_channels(data: &Array3<f64>, policy: ChannelReduction) -> Array2<f64> {
    let (_, _, channels) = data.dim();

    match policy {
        _ if channels <= 1 => data.index_axis(Axis(2), 0).to_owned(),
        ChannelReduction::FirstChannel => data.index_axis(Axis(2), 0).to_owned(),
        ChannelReduction::MeanOfChannels => {
            // Alpha never carries intensity; average at most the three color channels
            let color = data.slice(ndarray::s![.., .., ..channels.min(3)]);
            color
                .mean_axis(Axis(2))
                .unwrap_or_else(|| data.index_axis(Axis(2), 0).to_owned())
        }
    }
}

fn pixel_grid<T>(buffer: &image::ImageBuffer<image::Rgba<T>, Vec<T>>) -> Array3<f64>
where
    T: image::Primitive + num_traits::Bounded + Into<f64>,
{
    let (width, height) = (buffer.width() as usize, buffer.height() as usize);
    let mut data = Array3::zeros((height, width, 4));

    for (x, y, pixel) in buffer.enumerate_pixels() {
        for (c, &value) in pixel.0.iter().enumerate() {
            if let Some(cell) = data.get_mut((y as usize, x as usize, c)) {
                *cell = unit_scale(value);
            }
        }
    }

    data
}

// Normalizes by the full range of the storage type, e.g. 255 or 65535
fn unit_scale<T>(value: T) -> f64
where
    T: num_traits::Bounded + Into<f64> + Copy,
{
    value.into() / T::max_value().into()
}
