//! Convergence of the empirical RTP toward the analytical value

use serde::{Deserialize, Serialize};

use balut_core::{BalutError, BalutResult, CoefficientTable, ProbabilityModel};

use crate::config::SimConfig;
use crate::estimator::estimate_parallel;

/// Trial counts of the standard study
pub const DEFAULT_TRIAL_COUNTS: [u64; 4] = [1_000, 10_000, 100_000, 1_000_000];

/// One row of a convergence study
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergencePoint {
    pub trials: u64,
    pub rtp_percent: f64,
    pub standard_error_percent: f64,
    /// Empirical minus analytical RTP, in percentage points
    pub deviation_percent: f64,
}

/// Empirical RTP at increasing trial counts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConvergenceReport {
    /// Exact RTP of the table
    pub analytical_rtp_percent: f64,
    pub points: Vec<ConvergencePoint>,
}

impl ConvergenceReport {
    /// Largest absolute deviation across all points
    pub fn max_deviation(&self) -> f64 {
        self.points
            .iter()
            .map(|p| p.deviation_percent.abs())
            .fold(0.0, f64::max)
    }

    /// Point with the most trials
    pub fn last(&self) -> Option<&ConvergencePoint> {
        self.points.iter().max_by_key(|p| p.trials)
    }
}

/// Estimate RTP once per entry of `trial_counts`.
///
/// Run `i` uses `seed + i` when the config is seeded; other settings come
/// from `config`.
pub fn convergence_study(
    trial_counts: &[u64],
    config: &SimConfig,
    table: &CoefficientTable,
) -> BalutResult<ConvergenceReport> {
    if trial_counts.is_empty() {
        return Err(BalutError::InvalidInput("no trial counts given".into()));
    }

    let analytical_rtp_percent = ProbabilityModel::closed_form().rtp_percent(table);
    let mut points = Vec::with_capacity(trial_counts.len());

    for (i, &trials) in trial_counts.iter().enumerate() {
        let mut run = config.clone().with_trials(trials);
        run.seed = config.seed.map(|s| s.wrapping_add(i as u64));

        let result = estimate_parallel(&run, table)?;
        points.push(ConvergencePoint {
            trials,
            rtp_percent: result.rtp_percent(),
            standard_error_percent: result.standard_error_percent(),
            deviation_percent: result.rtp_percent() - analytical_rtp_percent,
        });
    }

    Ok(ConvergenceReport {
        analytical_rtp_percent,
        points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_empty_counts() {
        let config = SimConfig::default().with_seed(1);
        assert!(convergence_study(&[], &config, &CoefficientTable::base()).is_err());
    }

    #[test]
    fn test_rejects_zero_count() {
        let config = SimConfig::default().with_seed(1);
        assert!(convergence_study(&[100, 0], &config, &CoefficientTable::base()).is_err());
    }

    #[test]
    fn test_small_study() {
        let config = SimConfig::default().with_seed(8).with_workers(2);
        let report = convergence_study(&[500, 5_000], &config, &CoefficientTable::base()).unwrap();
        assert_eq!(report.points.len(), 2);
        assert_eq!(report.last().unwrap().trials, 5_000);
        assert!(report.analytical_rtp_percent > 200.0);
    }
}
