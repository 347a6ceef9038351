//! The N by N correlation-matrix figure
//!
//! Diagonal panels show each map's intensity histogram; the lower triangle
//! shows log-scaled joint histograms annotated with Pearson r; the upper
//! triangle shows false-color overlays for co-localization inspection.
//! The figure reads the supplied correlation results and never mutates
//! them; a pair missing from the results is recomputed locally.

use crate::correlation::pairs;
use crate::correlation::pearson::{self, CorrelationParams};
use crate::correlation::PairCorrelation;
use crate::io::configuration::{MATRIX_HEADER_MARGIN, MATRIX_PANEL_SIZE};
use crate::io::error::{Result, render_error};
use crate::preprocess::ElementMap;
use crate::viz::histogram::{self, CANVAS_GRAY, DrawResult};
use plotters::backend::BitMapBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontTransform, IntoFont, RGBColor, WHITE};
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

/// Render the N by N matrix figure for an ordered map sequence
///
/// Row and column order follow the input order, with map names as headers.
/// `correlations` supplies the annotated r values keyed by canonical pair
/// name.
///
/// # Errors
///
/// Returns `Render` when the figure cannot be drawn or written.
pub fn render_matrix(
    maps: &[Arc<ElementMap>],
    correlations: &[PairCorrelation],
    bins: usize,
    path: &Path,
) -> Result<()> {
    draw_matrix(maps, correlations, bins, path).map_err(|e| render_error(path, &e))
}

fn draw_matrix(
    maps: &[Arc<ElementMap>],
    correlations: &[PairCorrelation],
    bins: usize,
    path: &Path,
) -> DrawResult {
    let n = maps.len();
    if n == 0 {
        return Ok(());
    }

    let margin = MATRIX_HEADER_MARGIN;
    let size = 2 * margin + MATRIX_PANEL_SIZE * n as u32;
    let root = BitMapBackend::new(path, (size, size)).into_drawing_area();
    root.fill(&CANVAS_GRAY)?;

    let r_by_pair: HashMap<&str, f64> = correlations
        .iter()
        .map(|c| (c.pair.as_str(), c.measures.r))
        .collect();

    let inner = root.margin(margin, margin, margin, margin);
    let panels = inner.split_evenly((n, n));

    for i in 0..n {
        for j in 0..n {
            let (Some(panel), Some(row_map), Some(col_map)) =
                (panels.get(i * n + j), maps.get(i), maps.get(j))
            else {
                continue;
            };

            if i == j {
                histogram::draw_hist1d(panel, &histogram::histogram(&row_map.data, bins))?;
            } else if i > j {
                // Lower triangle: joint histogram; pair key is input order (j before i)
                let counts = histogram::histogram2d(&row_map.data, &col_map.data, bins);
                histogram::draw_hist2d(panel, &counts)?;
                draw_r_label(panel, lookup_r(&r_by_pair, col_map, row_map));
            } else {
                draw_overlay(panel, row_map, col_map)?;
                draw_r_label(panel, lookup_r(&r_by_pair, row_map, col_map));
            }
        }
    }

    draw_headers(&root, maps, margin, size);

    root.present()?;
    log::info!("wrote matrix figure {}", path.display());
    Ok(())
}

fn lookup_r(r_by_pair: &HashMap<&str, f64>, first: &ElementMap, second: &ElementMap) -> f64 {
    let key = pairs::pair_name(&first.name, &second.name);
    r_by_pair.get(key.as_str()).copied().unwrap_or_else(|| {
        pearson::correlate(&first.data, &second.data, &CorrelationParams::default())
            .map_or(f64::NAN, |m| m.r)
    })
}

// Row map fills the red channel, column map the green channel; co-located
// intensity reads as yellow
fn draw_overlay(
    area: &DrawingArea<BitMapBackend<'_>, Shift>,
    row_map: &ElementMap,
    col_map: &ElementMap,
) -> DrawResult {
    let (width, height) = area.dim_in_pixel();
    let (rows, cols) = row_map.dimensions();
    if width == 0 || height == 0 || rows == 0 || cols == 0 {
        return Ok(());
    }

    for py in 0..height {
        for px in 0..width {
            let i = (py as usize * rows) / height as usize;
            let j = (px as usize * cols) / width as usize;
            let red = intensity_byte(row_map.data.get((i, j)));
            let green = intensity_byte(col_map.data.get((i, j)));
            area.draw_pixel((px as i32, py as i32), &RGBColor(red, green, 0))?;
        }
    }

    Ok(())
}

// Masked (NaN) pixels render black
fn intensity_byte(value: Option<&f64>) -> u8 {
    let v = value.copied().unwrap_or(0.0);
    if v.is_finite() {
        (v.clamp(0.0, 1.0) * 255.0) as u8
    } else {
        0
    }
}

// Text size tracks |r|^(2/3) so strong correlations dominate the figure
fn draw_r_label(area: &DrawingArea<BitMapBackend<'_>, Shift>, r: f64) {
    if !r.is_finite() {
        return;
    }

    let (width, height) = area.dim_in_pixel();
    let size = (r.abs().powf(2.0 / 3.0) * 60.0).clamp(10.0, 72.0);
    let style = ("sans-serif", size as u32).into_font().color(&WHITE);
    histogram::draw_label(
        area,
        &format!("{r:.2}"),
        (width as i32 / 8, height as i32 / 2),
        &style,
    );
}

fn draw_headers(
    root: &DrawingArea<BitMapBackend<'_>, Shift>,
    maps: &[Arc<ElementMap>],
    margin: u32,
    size: u32,
) {
    let centered = Pos::new(HPos::Center, VPos::Center);

    for (index, map) in maps.iter().enumerate() {
        let center = (margin + MATRIX_PANEL_SIZE * index as u32 + MATRIX_PANEL_SIZE / 2) as i32;

        let top = ("sans-serif", 24)
            .into_font()
            .color(&WHITE)
            .pos(centered);
        histogram::draw_label(root, &map.name, (center, (margin / 2) as i32), &top);
        histogram::draw_label(
            root,
            &map.name,
            (center, (size - margin / 2) as i32),
            &top,
        );

        let side = ("sans-serif", 24)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&WHITE)
            .pos(centered);
        histogram::draw_label(root, &map.name, ((margin / 2) as i32, center), &side);
    }
}
