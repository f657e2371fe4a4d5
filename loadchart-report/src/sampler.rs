use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use loadchart_charts::Renderer;
use loadchart_common::{RequestOutcome, Result, DURATION_VIOLIN_FILE, SUCCESS_STATUS};

/// Per-concurrency-level duration samples, kept in arrival order.
///
/// Same lifecycle as [`RequestCounter`](crate::RequestCounter): `record` per
/// request, one save call after the run.
#[derive(Debug, Default)]
pub struct DurationSampler {
    samples: BTreeMap<u32, Vec<f64>>,
}

impl DurationSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-request callback; `body` is unused. Non-200 outcomes are ignored.
    /// Non-finite durations are dropped as well: NaN or infinity would
    /// poison the density estimate and the chart's axis range.
    pub fn record(&mut self, status_code: u16, _body: &[u8], duration: f64, concurrency: u32) {
        if status_code != SUCCESS_STATUS || !duration.is_finite() {
            return;
        }
        self.samples.entry(concurrency).or_default().push(duration);
    }

    pub fn record_outcome(&mut self, outcome: &RequestOutcome) {
        self.record(outcome.status_code, &[], outcome.duration, outcome.concurrency);
    }

    /// Distinct concurrency levels, ascending.
    pub fn levels(&self) -> Vec<u32> {
        self.samples.keys().copied().collect()
    }

    /// Per-level sample vectors in the same order as [`levels`](Self::levels).
    pub fn groups(&self) -> Vec<Vec<f64>> {
        self.samples.values().cloned().collect()
    }

    pub fn samples_for(&self, concurrency: u32) -> &[f64] {
        self.samples.get(&concurrency).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_samples(&self) -> usize {
        self.samples.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Render the violin chart without touching the filesystem.
    pub fn render(&self, renderer: &impl Renderer) -> Result<Vec<u8>> {
        renderer.render_violin(&self.levels(), &self.groups())
    }

    /// Render and write `req_duration_violinplot.png` under `dir`,
    /// overwriting any existing file. Returns the written path.
    pub fn save_to(&self, dir: impl AsRef<Path>, renderer: &impl Renderer) -> Result<PathBuf> {
        let path = dir.as_ref().join(DURATION_VIOLIN_FILE);
        fs::write(&path, self.render(renderer)?)?;
        Ok(path)
    }

    /// Teardown callback: write the chart to the current working directory.
    pub fn render_and_save(&self, renderer: &impl Renderer) -> Result<PathBuf> {
        self.save_to(".", renderer)
    }
}
