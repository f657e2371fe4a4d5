use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use loadchart_charts::Renderer;
use loadchart_common::{RequestOutcome, Result, REQUEST_COUNT_FILE, SUCCESS_STATUS};

/// Per-concurrency-level count of successful requests.
///
/// One instance per test run, owned by the driver: `record` once per
/// completed request, then one of the save methods after the run. `record`
/// takes `&mut self`, so concurrent drivers must wrap the counter in a
/// mutex.
#[derive(Debug, Default)]
pub struct RequestCounter {
    counts: BTreeMap<u32, u64>,
}

impl RequestCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Per-request callback. `body` and `duration` are part of the driver's
    /// callback contract but unused here; non-200 outcomes are ignored.
    pub fn record(&mut self, status_code: u16, _body: &[u8], _duration: f64, concurrency: u32) {
        if status_code != SUCCESS_STATUS {
            return;
        }
        *self.counts.entry(concurrency).or_insert(0) += 1;
    }

    pub fn record_outcome(&mut self, outcome: &RequestOutcome) {
        self.record(outcome.status_code, &[], outcome.duration, outcome.concurrency);
    }

    /// Distinct concurrency levels, ascending.
    pub fn levels(&self) -> Vec<u32> {
        self.counts.keys().copied().collect()
    }

    /// Counts in the same order as [`levels`](Self::levels).
    pub fn counts(&self) -> Vec<u64> {
        self.counts.values().copied().collect()
    }

    pub fn count_for(&self, concurrency: u32) -> u64 {
        self.counts.get(&concurrency).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Render the line chart without touching the filesystem.
    pub fn render(&self, renderer: &impl Renderer) -> Result<Vec<u8>> {
        renderer.render_line(&self.levels(), &self.counts())
    }

    /// Render and write `request_count.png` under `dir`, overwriting any
    /// existing file. Returns the written path.
    pub fn save_to(&self, dir: impl AsRef<Path>, renderer: &impl Renderer) -> Result<PathBuf> {
        let path = dir.as_ref().join(REQUEST_COUNT_FILE);
        fs::write(&path, self.render(renderer)?)?;
        Ok(path)
    }

    /// Teardown callback: write the chart to the current working directory.
    pub fn render_and_save(&self, renderer: &impl Renderer) -> Result<PathBuf> {
        self.save_to(".", renderer)
    }
}
