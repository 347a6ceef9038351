//! Jet colormap and log density compression for histogram figures

use plotters::style::RGBColor;

/// Map a normalized value in [0,1] onto the classic jet gradient
///
/// Runs dark blue through cyan, yellow, and red, which keeps sparse
/// histogram cells readable against the dominant background bin.
pub fn jet(value: f64) -> RGBColor {
    let v = value.clamp(0.0, 1.0);
    let r = 4.0f64.mul_add(v, -3.0);
    let g = 4.0f64.mul_add(v, -2.0);
    let b = 4.0f64.mul_add(v, -1.0);

    RGBColor(
        channel_byte(1.5 - r.abs()),
        channel_byte(1.5 - g.abs()),
        channel_byte(1.5 - b.abs()),
    )
}

/// Compress a count into [0,1] on a log scale relative to the maximum
///
/// Joint histograms of element maps are dominated by one background cell;
/// without log compression every other cell renders as the lowest color.
pub fn log_compress(count: f64, max_count: f64) -> f64 {
    if count <= 0.0 || max_count <= 0.0 {
        return 0.0;
    }
    ((1.0 + count).ln() / (1.0 + max_count).ln()).clamp(0.0, 1.0)
}

fn channel_byte(value: f64) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0) as u8
}
