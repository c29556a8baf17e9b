//! Statistical checks of the estimator against the exact odds

use approx::assert_abs_diff_eq;
use balut_core::{CoefficientTable, CombinationCategory, ProbabilityModel, calibrate};
use balut_sim::{DEFAULT_TRIAL_COUNTS, SimConfig, convergence_study, estimate_parallel};

#[test]
fn million_trials_within_one_point_of_analytical() {
    let table = CoefficientTable::base();
    let analytical = ProbabilityModel::closed_form().rtp_percent(&table);

    let config = SimConfig::default().with_trials(1_000_000).with_seed(20_240_601).with_workers(8);
    let result = estimate_parallel(&config, &table).unwrap();

    assert_eq!(result.trials(), 1_000_000);
    assert!(
        (result.rtp_percent() - analytical).abs() < 1.0,
        "estimate {:.3}% vs analytical {:.3}%",
        result.rtp_percent(),
        analytical
    );
}

#[test]
fn standard_error_shrinks_with_trials() {
    let config = SimConfig::default().with_seed(77).with_workers(4);
    let report = convergence_study(&DEFAULT_TRIAL_COUNTS, &config, &CoefficientTable::base()).unwrap();

    assert_eq!(report.points.len(), DEFAULT_TRIAL_COUNTS.len());
    for pair in report.points.windows(2) {
        // 10x trials, so roughly 1/sqrt(10) of the error
        let ratio = pair[1].standard_error_percent / pair[0].standard_error_percent;
        assert!(ratio > 0.2 && ratio < 0.5, "ratio {ratio}");
    }

    let last = report.last().unwrap();
    assert!(last.deviation_percent.abs() < 1.0);
    // payout sd of the base table is ~0.75, so the 1e6 stderr is ~0.075 pp
    assert_abs_diff_eq!(last.standard_error_percent, 0.0753, epsilon = 0.01);
}

#[test]
fn hit_frequencies_match_exact_probabilities() {
    let model = ProbabilityModel::closed_form();
    let config = SimConfig::default().with_trials(500_000).with_seed(3).with_workers(4);
    let result = estimate_parallel(&config, &CoefficientTable::base()).unwrap();

    for category in CombinationCategory::ALL {
        let p = model.probability(category);
        let tolerance = 5.0 * (p * (1.0 - p) / 500_000.0).sqrt() + 1e-6;
        assert!(
            (result.hit_frequency(category) - p).abs() < tolerance,
            "{category}: {} vs {p}",
            result.hit_frequency(category)
        );
    }
}

#[test]
fn calibrated_table_simulates_near_target() {
    let calibration = calibrate(0.95, &CoefficientTable::base()).unwrap();
    let config = SimConfig::default().with_trials(1_000_000).with_seed(95).with_workers(8);
    let result = estimate_parallel(&config, &calibration.table).unwrap();

    assert!((result.rtp_percent() - 95.0).abs() < 0.5, "{}", result.rtp_percent());
}
