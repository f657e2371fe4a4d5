use loadchart_report::synthetic;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_generate_shape() {
    let mut rng = StdRng::seed_from_u64(7);
    let levels = [1u32, 5, 10];
    let outcomes = synthetic::generate(&levels, 50, &mut rng);

    assert_eq!(outcomes.len(), 150);
    for outcome in &outcomes {
        assert!(levels.contains(&outcome.concurrency));
        assert!(outcome.duration > 0.0, "duration {} not positive", outcome.duration);
        assert!(
            outcome.status_code == 200 || outcome.status_code == 500,
            "unexpected status {}",
            outcome.status_code
        );
    }
    for level in levels {
        let n = outcomes.iter().filter(|o| o.concurrency == level).count();
        assert_eq!(n, 50);
    }
}

#[test]
fn test_generate_deterministic_under_seed() {
    let a = synthetic::generate(&[2, 4], 30, &mut StdRng::seed_from_u64(42));
    let b = synthetic::generate(&[2, 4], 30, &mut StdRng::seed_from_u64(42));
    assert_eq!(a, b);
}

#[test]
fn test_generate_latency_grows_with_level() {
    let mut rng = StdRng::seed_from_u64(11);
    let outcomes = synthetic::generate(&[1, 50], 200, &mut rng);

    let mean_at = |level: u32| {
        let samples: Vec<f64> = outcomes
            .iter()
            .filter(|o| o.concurrency == level)
            .map(|o| o.duration)
            .collect();
        samples.iter().sum::<f64>() / samples.len() as f64
    };
    assert!(mean_at(50) > mean_at(1));
}
