use loadchart_charts::Renderer;
use loadchart_common::Result;
use loadchart_report::RequestCounter;

/// Captures the sorted levels and counts the accumulator hands to the
/// renderer, without invoking a drawing backend.
struct StubRenderer;

impl Renderer for StubRenderer {
    fn render_line(&self, labels: &[u32], counts: &[u64]) -> Result<Vec<u8>> {
        Ok(format!("line {labels:?} {counts:?}").into_bytes())
    }

    fn render_violin(&self, labels: &[u32], groups: &[Vec<f64>]) -> Result<Vec<u8>> {
        Ok(format!("violin {labels:?} {groups:?}").into_bytes())
    }
}

#[test]
fn test_single_success_recorded() {
    let mut counter = RequestCounter::new();
    counter.record(200, b"", 1.2, 5);

    assert_eq!(counter.levels(), vec![5]);
    assert_eq!(counter.count_for(5), 1);
    assert_eq!(counter.total(), 1);
}

#[test]
fn test_non_success_is_ignored() {
    let mut counter = RequestCounter::new();
    counter.record(200, b"", 1.2, 5);
    counter.record(200, b"", 0.9, 5);
    counter.record(404, b"", 5.0, 5);

    assert_eq!(counter.count_for(5), 2);
}

#[test]
fn test_non_success_changes_nothing_regardless_of_arguments() {
    let mut counter = RequestCounter::new();
    for status in [201u16, 301, 404, 500, 503] {
        counter.record(status, b"payload", -1.0, 99);
    }

    assert!(counter.is_empty());
    assert_eq!(counter.total(), 0);
}

#[test]
fn test_levels_sorted_regardless_of_arrival_order() {
    let mut counter = RequestCounter::new();
    for level in [50u32, 1, 10, 5, 10, 1] {
        counter.record(200, b"", 0.1, level);
    }

    assert_eq!(counter.levels(), vec![1, 5, 10, 50]);
    assert_eq!(counter.counts(), vec![2, 1, 2, 1]);
}

#[test]
fn test_render_passes_sorted_data() {
    let mut counter = RequestCounter::new();
    counter.record(200, b"", 0.1, 8);
    counter.record(200, b"", 0.1, 2);
    counter.record(200, b"", 0.1, 8);

    let bytes = counter.render(&StubRenderer).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "line [2, 8] [1, 2]");
}

#[test]
fn test_render_does_not_mutate() {
    let mut counter = RequestCounter::new();
    counter.record(200, b"", 0.1, 3);

    let first = counter.render(&StubRenderer).unwrap();
    let second = counter.render(&StubRenderer).unwrap();
    assert_eq!(first, second);
    assert_eq!(counter.count_for(3), 1);
}

#[test]
fn test_render_empty_counter() {
    let counter = RequestCounter::new();
    let bytes = counter.render(&StubRenderer).unwrap();
    assert_eq!(String::from_utf8(bytes).unwrap(), "line [] []");
}
