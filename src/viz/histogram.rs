//! Histogram computation and the standalone per-pair figure

use crate::io::configuration::PAIR_HISTOGRAM_SIZE;
use crate::io::error::{Result, render_error};
use crate::preprocess::ElementMap;
use crate::viz::colormap;
use ndarray::Array2;
use plotters::backend::BitMapBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{Rectangle, Text};
use plotters::style::{Color, IntoFont, RGBColor, TextStyle, WHITE};
use std::path::Path;

pub(crate) type DrawResult = std::result::Result<(), Box<dyn std::error::Error>>;

/// Background gray shared by all figures
pub(crate) const CANVAS_GRAY: RGBColor = RGBColor(128, 128, 128);

// Bar fill for the diagonal intensity histograms
const BAR_BLUE: RGBColor = RGBColor(173, 216, 230);

/// Count values into equal-width bins spanning [0,1]
///
/// Non-finite (masked) values are skipped entirely; values outside [0,1]
/// are clamped into the edge bins.
pub fn histogram(values: &Array2<f64>, bins: usize) -> Vec<usize> {
    let mut counts = vec![0usize; bins];
    if bins == 0 {
        return counts;
    }

    for &value in values {
        if value.is_finite() {
            if let Some(slot) = counts.get_mut(bin_index(value, bins)) {
                *slot += 1;
            }
        }
    }

    counts
}

/// Joint histogram over [0,1] x [0,1] of two equally-shaped grids
///
/// Only pixels finite in BOTH grids are counted, mirroring the combined
/// mask used by the correlation itself.
pub fn histogram2d(x: &Array2<f64>, y: &Array2<f64>, bins: usize) -> Array2<f64> {
    let mut counts = Array2::zeros((bins.max(1), bins.max(1)));
    if bins == 0 {
        return counts;
    }

    for (&a, &b) in x.iter().zip(y.iter()) {
        if a.is_finite() && b.is_finite() {
            if let Some(cell) = counts.get_mut((bin_index(a, bins), bin_index(b, bins))) {
                *cell += 1.0;
            }
        }
    }

    counts
}

fn bin_index(value: f64, bins: usize) -> usize {
    let clamped = value.clamp(0.0, 1.0);
    ((clamped * bins as f64) as usize).min(bins - 1)
}

/// Render a standalone 2D joint histogram figure for one pair
///
/// One PNG per pair, log-scaled jet cells on a gray canvas with the map
/// names as axis labels.
///
/// # Errors
///
/// Returns `Render` when the figure cannot be drawn or written.
pub fn render_pair_histogram(
    x: &ElementMap,
    y: &ElementMap,
    bins: usize,
    path: &Path,
) -> Result<()> {
    draw_figure(x, y, bins, path).map_err(|e| render_error(path, &e))
}

fn draw_figure(x: &ElementMap, y: &ElementMap, bins: usize, path: &Path) -> DrawResult {
    let root = BitMapBackend::new(path, (PAIR_HISTOGRAM_SIZE, PAIR_HISTOGRAM_SIZE))
        .into_drawing_area();
    root.fill(&CANVAS_GRAY)?;

    let counts = histogram2d(&x.data, &y.data, bins);
    draw_hist2d(&root, &counts)?;

    let (width, height) = root.dim_in_pixel();
    let style = ("sans-serif", 28).into_font().color(&WHITE);
    draw_label(&root, &x.name, (width as i32 / 2, height as i32 - 34), &style);
    draw_label(&root, &y.name, (6, height as i32 / 2), &style);

    root.present()?;
    Ok(())
}

// Log-compressed jet cells; the vertical axis grows upward
pub(crate) fn draw_hist2d(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    counts: &Array2<f64>,
) -> DrawResult {
    let (width, height) = area.dim_in_pixel();
    let (bins_x, bins_y) = counts.dim();
    if bins_x == 0 || bins_y == 0 {
        return Ok(());
    }

    let max_count = counts.iter().copied().fold(0.0_f64, f64::max);

    for ((i, j), &count) in counts.indexed_iter() {
        let color = colormap::jet(colormap::log_compress(count, max_count));
        let x0 = (i * width as usize / bins_x) as i32;
        let x1 = ((i + 1) * width as usize / bins_x) as i32;
        let y0 = (height as usize - (j + 1) * height as usize / bins_y) as i32;
        let y1 = (height as usize - j * height as usize / bins_y) as i32;
        area.draw(&Rectangle::new([(x0, y0), (x1, y1)], color.filled()))?;
    }

    Ok(())
}

// Square-root-scaled bars compress the dominant background bin
pub(crate) fn draw_hist1d(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    counts: &[usize],
) -> DrawResult {
    let (width, height) = area.dim_in_pixel();
    let bins = counts.len();
    if bins == 0 {
        return Ok(());
    }

    let max_height = counts
        .iter()
        .map(|&c| (c as f64).sqrt())
        .fold(0.0_f64, f64::max);
    if max_height <= 0.0 {
        return Ok(());
    }

    for (k, &count) in counts.iter().enumerate() {
        let bar = (count as f64).sqrt() / max_height * f64::from(height) * 0.95;
        let x0 = (k * width as usize / bins) as i32;
        let x1 = ((k + 1) * width as usize / bins) as i32;
        let y0 = (f64::from(height) - bar) as i32;
        area.draw(&Rectangle::new(
            [(x0, y0), (x1, height as i32)],
            BAR_BLUE.filled(),
        ))?;
    }

    Ok(())
}

// Labels are cosmetic; a machine without usable fonts still gets the figure
pub(crate) fn draw_label(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    text: &str,
    position: (i32, i32),
    style: &TextStyle<'_>,
) {
    if let Err(err) = area.draw(&Text::new(text.to_string(), position, style.clone())) {
        log::debug!("skipping label '{text}': {err}");
    }
}
