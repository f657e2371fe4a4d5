use loadchart_common::RequestOutcome;
use rand::Rng;

/// Fraction of generated requests that report HTTP 500.
const FAILURE_RATE: f64 = 0.02;

/// Generate a synthetic run for chart previews and tests:
/// `requests_per_level` outcomes per concurrency level, durations drawn from
/// a normal distribution whose center and spread grow with the level
/// (queueing pushes latency up with load), clamped positive.
pub fn generate(
    levels: &[u32],
    requests_per_level: usize,
    rng: &mut impl Rng,
) -> Vec<RequestOutcome> {
    let mut out = Vec::with_capacity(levels.len() * requests_per_level);
    for &level in levels {
        let mean = 0.05 * level as f64;
        let sigma = mean * 0.25;
        for _ in 0..requests_per_level {
            let duration = (mean + sigma * standard_normal(rng)).max(0.001);
            let status_code = if rng.gen_bool(FAILURE_RATE) { 500 } else { 200 };
            out.push(RequestOutcome { status_code, duration, concurrency: level });
        }
    }
    out
}

/// Box-Muller transform over two uniform draws.
fn standard_normal(rng: &mut impl Rng) -> f64 {
    let u1: f64 = rng.gen_range(f64::EPSILON..1.0);
    let u2: f64 = rng.gen();
    (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
}
