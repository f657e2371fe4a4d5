use loadchart_common::{ChartError, Result};
use plotters::prelude::*;

pub mod kde;

/// Chart rendering isolated behind a narrow interface so aggregation can be
/// unit-tested without a drawing backend. Implementations take the sorted
/// concurrency levels plus per-level data and return encoded PNG bytes.
pub trait Renderer {
    /// Line chart of completed-request counts, one point per level.
    fn render_line(&self, labels: &[u32], counts: &[u64]) -> Result<Vec<u8>>;

    /// Violin chart: one density shape per level. `groups[i]` holds the
    /// duration samples for `labels[i]`; empty groups are skipped.
    fn render_violin(&self, labels: &[u32], groups: &[Vec<f64>]) -> Result<Vec<u8>>;
}

/// `plotters` bitmap renderer producing deterministic PNG output.
#[derive(Debug, Clone, Copy)]
pub struct PngRenderer {
    pub width: u32,
    pub height: u32,
}

impl Default for PngRenderer {
    fn default() -> Self {
        Self { width: 640, height: 480 }
    }
}

/// Grid resolution of each violin's density profile.
const KDE_POINTS: usize = 64;

/// Widest half-extent of a violin shape, in x-axis units.
const VIOLIN_HALF_WIDTH: f64 = 0.4;

impl Renderer for PngRenderer {
    fn render_line(&self, labels: &[u32], counts: &[u64]) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; (self.width * self.height * 3) as usize];
        {
            let root =
                BitMapBackend::with_buffer(&mut buf, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let y_max = counts.iter().max().copied().unwrap_or(0) as f64;
            let mut chart = ChartBuilder::on(&root)
                .caption("Number of completed requests", ("sans-serif", 24))
                .set_label_area_size(LabelAreaPosition::Left, 55)
                .set_label_area_size(LabelAreaPosition::Bottom, 45)
                .build_cartesian_2d(x_axis_range(labels.len()), 0f64..pad_upper(y_max))
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .x_desc("Number of concurrent requests")
                .y_desc("Number of requests")
                .x_labels(labels.len() + 2)
                .x_label_formatter(&|x| position_label(labels, *x))
                .draw()
                .map_err(render_err)?;

            if !labels.is_empty() {
                let points: Vec<(f64, f64)> = counts
                    .iter()
                    .enumerate()
                    .map(|(i, c)| ((i + 1) as f64, *c as f64))
                    .collect();
                chart
                    .draw_series(LineSeries::new(points.clone(), &BLUE))
                    .map_err(render_err)?;
                chart
                    .draw_series(points.iter().map(|p| Circle::new(*p, 3, BLUE.filled())))
                    .map_err(render_err)?;
            }
            root.present().map_err(render_err)?;
        }
        encode_png(buf, self.width, self.height)
    }

    fn render_violin(&self, labels: &[u32], groups: &[Vec<f64>]) -> Result<Vec<u8>> {
        let mut buf = vec![0u8; (self.width * self.height * 3) as usize];
        {
            let root =
                BitMapBackend::with_buffer(&mut buf, (self.width, self.height)).into_drawing_area();
            root.fill(&WHITE).map_err(render_err)?;

            let (y_lo, y_hi) = value_range(groups);
            let mut chart = ChartBuilder::on(&root)
                .caption("Request duration violin plots", ("sans-serif", 24))
                .set_label_area_size(LabelAreaPosition::Left, 55)
                .set_label_area_size(LabelAreaPosition::Bottom, 45)
                .build_cartesian_2d(x_axis_range(labels.len()), y_lo..y_hi)
                .map_err(render_err)?;

            chart
                .configure_mesh()
                .x_desc("Number of concurrent requests")
                .y_desc("Durations")
                .x_labels(labels.len() + 2)
                .x_label_formatter(&|x| position_label(labels, *x))
                .draw()
                .map_err(render_err)?;

            for (i, samples) in groups.iter().enumerate() {
                if samples.is_empty() {
                    continue;
                }
                let center = (i + 1) as f64;
                let spread = sample_spread(samples);
                if spread == 0.0 {
                    // All samples equal (including the single-sample case):
                    // no density to estimate, draw a flat bar at the value.
                    let v = samples[0];
                    chart
                        .draw_series(std::iter::once(PathElement::new(
                            vec![(center - 0.15, v), (center + 0.15, v)],
                            BLUE.stroke_width(2),
                        )))
                        .map_err(render_err)?;
                    continue;
                }

                let profile = kde::density_profile(samples, KDE_POINTS);
                let peak = profile.iter().map(|(_, d)| *d).fold(0.0, f64::max);
                let scale = VIOLIN_HALF_WIDTH / peak;

                let mut outline: Vec<(f64, f64)> = profile
                    .iter()
                    .map(|(v, d)| (center + d * scale, *v))
                    .collect();
                outline.extend(profile.iter().rev().map(|(v, d)| (center - d * scale, *v)));
                chart
                    .draw_series(std::iter::once(Polygon::new(outline, BLUE.mix(0.35).filled())))
                    .map_err(render_err)?;
            }
            root.present().map_err(render_err)?;
        }
        encode_png(buf, self.width, self.height)
    }
}

/// Positions run 1..=N; the drawn range keeps half a slot of margin on each
/// side. An empty chart still gets a unit range so the mesh can be drawn.
fn x_axis_range(n: usize) -> std::ops::Range<f64> {
    0f64..(n as f64 + 1.0).max(1.0)
}

/// Tick label for x position `x`: the concurrency level at that 1-based
/// position, or empty for non-integer and out-of-range positions.
/// Exposed for deterministic testing.
pub fn position_label(labels: &[u32], x: f64) -> String {
    let i = x.round();
    if (x - i).abs() > 1e-6 || i < 1.0 || i > labels.len() as f64 {
        return String::new();
    }
    labels[i as usize - 1].to_string()
}

fn pad_upper(max: f64) -> f64 {
    if max <= 0.0 {
        1.0
    } else {
        max * 1.1
    }
}

/// Overall y range across all groups, padded by 5% of the span (or a unit
/// when the span collapses). Empty input falls back to `0..1`.
fn value_range(groups: &[Vec<f64>]) -> (f64, f64) {
    let mut lo = f64::INFINITY;
    let mut hi = f64::NEG_INFINITY;
    for s in groups.iter().flatten() {
        lo = lo.min(*s);
        hi = hi.max(*s);
    }
    if lo > hi {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { (hi - lo) * 0.05 } else { 1.0 };
    (lo - pad, hi + pad)
}

fn sample_spread(samples: &[f64]) -> f64 {
    let lo = samples.iter().cloned().fold(f64::INFINITY, f64::min);
    let hi = samples.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
    hi - lo
}

fn render_err(e: impl std::fmt::Display) -> ChartError {
    ChartError::Render(e.to_string())
}

/// Encode a raw RGB buffer as PNG bytes.
fn encode_png(buf: Vec<u8>, width: u32, height: u32) -> Result<Vec<u8>> {
    let img = image::RgbImage::from_raw(width, height, buf)
        .ok_or_else(|| ChartError::Encode("buffer length mismatch".to_string()))?;
    let mut bytes = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
        .map_err(|e| ChartError::Encode(e.to_string()))?;
    Ok(bytes)
}
