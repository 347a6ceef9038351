//! Separable Gaussian smoothing for intensity grids

use ndarray::Array2;

/// Apply isotropic Gaussian smoothing with the given standard deviation
///
/// A non-positive sigma returns the input unchanged. Edges are handled by
/// reflection, and the kernel is truncated at four standard deviations.
pub fn gaussian_blur(input: &Array2<f64>, sigma: f64) -> Array2<f64> {
    if sigma <= 0.0 {
        return input.clone();
    }

    let kernel = gaussian_kernel(sigma);
    let horizontal = convolve_1d(input, &kernel, true);
    convolve_1d(&horizontal, &kernel, false)
}

// Normalized 1D kernel with radius ceil(4 * sigma)
fn gaussian_kernel(sigma: f64) -> Vec<f64> {
    let radius = (4.0 * sigma).ceil() as i64;
    let mut kernel = Vec::with_capacity((2 * radius + 1) as usize);
    let mut total = 0.0;

    for offset in -radius..=radius {
        let u = offset as f64 / sigma;
        let weight = (-0.5 * u * u).exp();
        kernel.push(weight);
        total += weight;
    }

    kernel.iter().map(|w| w / total).collect()
}

fn convolve_1d(input: &Array2<f64>, kernel: &[f64], along_row: bool) -> Array2<f64> {
    let (rows, cols) = input.dim();
    let radius = (kernel.len() / 2) as i64;
    let mut output = Array2::zeros((rows, cols));

    for ((i, j), out) in output.indexed_iter_mut() {
        let mut sum = 0.0;
        for (k, weight) in kernel.iter().enumerate() {
            let offset = k as i64 - radius;
            let (si, sj) = if along_row {
                (i, reflect_index(j as i64 + offset, cols))
            } else {
                (reflect_index(i as i64 + offset, rows), j)
            };
            sum += weight * input.get((si, sj)).copied().unwrap_or(0.0);
        }
        *out = sum;
    }

    output
}

// Mirrors out-of-range indices: a b c d -> d c b a | a b c d | d c b a
fn reflect_index(index: i64, len: usize) -> usize {
    let n = len as i64;
    let mut i = index;
    loop {
        if i < 0 {
            i = -i - 1;
        } else if i >= n {
            i = 2 * n - i - 1;
        } else {
            return i as usize;
        }
    }
}
