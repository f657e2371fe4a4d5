use loadchart_common::{RequestOutcome, SUCCESS_STATUS};

#[test]
fn test_outcome_json_round_trip() {
    let outcome = RequestOutcome { status_code: 200, duration: 1.25, concurrency: 8 };
    let json = serde_json::to_string(&outcome).unwrap();
    let parsed: RequestOutcome = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, outcome);
}

#[test]
fn test_outcome_parses_driver_line() {
    let line = r#"{"status_code":503,"duration":30.0,"concurrency":100}"#;
    let parsed: RequestOutcome = serde_json::from_str(line).unwrap();
    assert_eq!(parsed.status_code, 503);
    assert_eq!(parsed.concurrency, 100);
    assert!(!parsed.is_success());
}

#[test]
fn test_success_is_exactly_200() {
    for status in [200u16] {
        assert!(RequestOutcome { status_code: status, duration: 0.1, concurrency: 1 }.is_success());
    }
    // 2xx other than 200 does not count; neither do redirects or errors.
    for status in [201u16, 204, 301, 404, 500] {
        assert!(!RequestOutcome { status_code: status, duration: 0.1, concurrency: 1 }.is_success());
    }
    assert_eq!(SUCCESS_STATUS, 200);
}
