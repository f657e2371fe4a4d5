//! Gaussian kernel density estimation for the violin chart.

const SQRT_TAU: f64 = 2.5066282746310002; // sqrt(2 * pi)

/// Silverman's rule-of-thumb bandwidth: `1.06 * sigma * n^(-1/5)`.
/// Returns a small positive fallback when the samples have zero spread,
/// so the caller always gets a usable kernel width.
pub fn bandwidth(samples: &[f64]) -> f64 {
    let n = samples.len();
    if n < 2 {
        return 1.0;
    }
    let sigma = std_dev(samples);
    if sigma <= 0.0 {
        return 1.0;
    }
    1.06 * sigma * (n as f64).powf(-0.2)
}

/// Evaluate the Gaussian KDE of `samples` on an evenly spaced grid of
/// `points` positions spanning `[min - 3h, max + 3h]`.
/// Returns `(position, density)` pairs; empty when `samples` is empty.
pub fn density_profile(samples: &[f64], points: usize) -> Vec<(f64, f64)> {
    if samples.is_empty() || points < 2 {
        return Vec::new();
    }
    let h = bandwidth(samples);
    let lo = samples.iter().cloned().fold(f64::INFINITY, f64::min) - 3.0 * h;
    let hi = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max) + 3.0 * h;
    let step = (hi - lo) / (points - 1) as f64;
    let norm = 1.0 / (samples.len() as f64 * h * SQRT_TAU);

    (0..points)
        .map(|i| {
            let x = lo + step * i as f64;
            let density: f64 = samples
                .iter()
                .map(|s| {
                    let z = (x - s) / h;
                    (-0.5 * z * z).exp()
                })
                .sum();
            (x, density * norm)
        })
        .collect()
}

fn std_dev(samples: &[f64]) -> f64 {
    let n = samples.len() as f64;
    let mean = samples.iter().sum::<f64>() / n;
    let var = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f64>() / n;
    var.sqrt()
}
