//! End-to-end tests for the sample command.

use vorpal_cli::commands::sample::{sample, DistKind};

/// Summaries land near the analytic moments.
#[test]
fn test_summary_moments() {
    let summary = sample(DistKind::Gaussian, &[5.0, 2.0], 20_000).unwrap();
    assert_eq!(summary.distribution, "gaussian");
    assert_eq!(summary.count, 20_000);
    assert!((summary.mean - 5.0).abs() < 0.1, "mean {}", summary.mean);
    assert!((summary.variance - 4.0).abs() < 0.3, "variance {}", summary.variance);

    let summary = sample(DistKind::Bernoulli, &[0.25], 20_000).unwrap();
    assert!(summary.min >= 0.0 && summary.max <= 1.0);
    assert!((summary.mean - 0.25).abs() < 0.03, "mean {}", summary.mean);
}

/// The summary serializes with the expected field names.
#[test]
fn test_summary_json_shape() {
    let summary = sample(DistKind::Poisson, &[3.0], 500).unwrap();
    let value = serde_json::to_value(&summary).unwrap();

    assert_eq!(value["distribution"], "poisson");
    assert_eq!(value["params"], serde_json::json!([3.0]));
    assert_eq!(value["count"], 500);
    for field in ["mean", "variance", "min", "max"] {
        assert!(value[field].is_number(), "missing {}", field);
    }
}
