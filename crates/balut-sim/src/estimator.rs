//! Monte-Carlo RTP estimator

use rand::prelude::*;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use balut_core::{BalutResult, CoefficientTable, CombinationCategory, classify};

use crate::config::{SimConfig, validate_run};
use crate::source::{DiceSource, SeededDice};

/// Totals from one estimation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    trials: u64,
    bet_amount: f64,
    total_bet: f64,
    total_payout: f64,
    /// Σ coefficient², for the standard error
    coefficient_sq_sum: f64,
    hits: [u64; 5],
}

impl SimulationResult {
    fn empty(bet_amount: f64) -> Self {
        Self {
            trials: 0,
            bet_amount,
            total_bet: 0.0,
            total_payout: 0.0,
            coefficient_sq_sum: 0.0,
            hits: [0; 5],
        }
    }

    fn record(&mut self, category: CombinationCategory, coefficient: f64) {
        self.trials += 1;
        self.total_bet += self.bet_amount;
        self.total_payout += self.bet_amount * coefficient;
        self.coefficient_sq_sum += coefficient * coefficient;
        self.hits[category.index()] += 1;
    }

    /// Combine two runs made with the same stake
    pub(crate) fn merge(mut self, other: &SimulationResult) -> Self {
        self.trials += other.trials;
        self.total_bet += other.total_bet;
        self.total_payout += other.total_payout;
        self.coefficient_sq_sum += other.coefficient_sq_sum;
        for (mine, theirs) in self.hits.iter_mut().zip(other.hits) {
            *mine += theirs;
        }
        self
    }

    pub fn trials(&self) -> u64 {
        self.trials
    }

    pub fn bet_amount(&self) -> f64 {
        self.bet_amount
    }

    pub fn total_bet(&self) -> f64 {
        self.total_bet
    }

    pub fn total_payout(&self) -> f64 {
        self.total_payout
    }

    /// Empirical RTP, `100 · payout / bet`
    pub fn rtp_percent(&self) -> f64 {
        if self.total_bet > 0.0 {
            (self.total_payout / self.total_bet) * 100.0
        } else {
            0.0
        }
    }

    /// Standard error of [`Self::rtp_percent`]
    pub fn standard_error_percent(&self) -> f64 {
        if self.trials <= 1 {
            return 0.0;
        }
        let n = self.trials as f64;
        let mean = self.total_payout / self.total_bet;
        let variance = (self.coefficient_sq_sum / n - mean * mean).max(0.0);
        (variance / n).sqrt() * 100.0
    }

    /// Rounds that landed in a category
    pub fn hits(&self, category: CombinationCategory) -> u64 {
        self.hits[category.index()]
    }

    /// Share of rounds that landed in a category
    pub fn hit_frequency(&self, category: CombinationCategory) -> f64 {
        if self.trials > 0 {
            self.hits(category) as f64 / self.trials as f64
        } else {
            0.0
        }
    }
}

fn run_trials<S: DiceSource + ?Sized>(
    trials: u64,
    bet_amount: f64,
    table: &CoefficientTable,
    source: &mut S,
) -> BalutResult<SimulationResult> {
    let mut result = SimulationResult::empty(bet_amount);
    for _ in 0..trials {
        let roll = source.roll()?;
        let category = classify(&roll);
        result.record(category, table.get(category));
    }
    Ok(result)
}

/// Play `trials` rounds of `bet_amount` against `table`, drawing from `source`.
///
/// Fails with `InvalidInput` for zero trials or a non-positive stake, and
/// with `RandomSourceFailure` if the source gives out mid-run.
pub fn estimate_rtp<S: DiceSource + ?Sized>(
    trials: u64,
    bet_amount: f64,
    table: &CoefficientTable,
    source: &mut S,
) -> BalutResult<SimulationResult> {
    validate_run(trials, bet_amount)?;
    table.validate()?;

    let result = run_trials(trials, bet_amount, table, source)?;
    log::debug!(
        "estimate_rtp: {} trials, RTP {:.4}% ± {:.4}",
        result.trials,
        result.rtp_percent(),
        result.standard_error_percent()
    );
    Ok(result)
}

/// RTP percentage of the base table over `trials` OS-seeded rounds
pub fn estimate(trials: u64, bet_amount: f64) -> BalutResult<f64> {
    let mut dice = SeededDice::from_entropy();
    estimate_rtp(trials, bet_amount, &CoefficientTable::base(), &mut dice)
        .map(|r| r.rtp_percent())
}

/// Run `config.trials` rounds split across the rayon pool.
///
/// Chunk `i` draws from stream `i` of the config seed, so the result is
/// reproducible for a fixed seed and worker count.
pub fn estimate_parallel(config: &SimConfig, table: &CoefficientTable) -> BalutResult<SimulationResult> {
    config.validate()?;
    table.validate()?;

    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let workers = config.effective_workers();
    let base = config.trials / workers as u64;
    let remainder = config.trials % workers as u64;

    log::debug!(
        "estimate_parallel: {} trials over {workers} chunks, seed {seed}",
        config.trials
    );

    let chunks: Vec<SimulationResult> = (0..workers)
        .into_par_iter()
        .map(|chunk| {
            let chunk = chunk as u64;
            let trials = base + u64::from(chunk < remainder);
            let mut dice = SeededDice::with_stream(seed, chunk);
            run_trials(trials, config.bet_amount, table, &mut dice)
        })
        .collect::<BalutResult<_>>()?;

    let result = chunks
        .iter()
        .fold(SimulationResult::empty(config.bet_amount), |acc, chunk| acc.merge(chunk));

    log::info!(
        "RTP after {} simulations: {:.2}%",
        result.trials,
        result.rtp_percent()
    );
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedDice;
    use approx::assert_abs_diff_eq;
    use balut_core::{BalutError, ProbabilityModel};

    #[test]
    fn test_zero_trials_is_invalid() {
        let mut dice = SeededDice::new(1);
        assert!(matches!(
            estimate_rtp(0, 1.0, &CoefficientTable::base(), &mut dice),
            Err(BalutError::InvalidInput(_))
        ));
        assert!(matches!(estimate(0, 1.0), Err(BalutError::InvalidInput(_))));
    }

    #[test]
    fn test_non_positive_bet_is_invalid() {
        let mut dice = SeededDice::new(1);
        assert!(estimate_rtp(10, 0.0, &CoefficientTable::base(), &mut dice).is_err());
        assert!(estimate_rtp(10, -1.0, &CoefficientTable::base(), &mut dice).is_err());
    }

    #[test]
    fn test_scripted_rounds() {
        // Balut, straight, full house, pair
        let mut dice = ScriptedDice::new(vec![
            6, 6, 6, 6, 6, //
            1, 2, 3, 4, 5, //
            3, 3, 3, 5, 5, //
            2, 2, 5, 6, 1,
        ]);
        let result = estimate_rtp(4, 2.0, &CoefficientTable::base(), &mut dice).unwrap();
        assert_eq!(result.trials(), 4);
        assert_eq!(result.total_bet(), 8.0);
        assert_eq!(result.total_payout(), 2.0 * (4.0 + 5.0 + 3.0 + 2.0));
        assert_abs_diff_eq!(result.rtp_percent(), 350.0, epsilon = 1e-12);
        assert_eq!(result.hits(CombinationCategory::Straight), 1);
        assert_eq!(result.hits(CombinationCategory::Other), 0);
    }

    #[test]
    fn test_exhausted_source_returns_no_partial_result() {
        let mut dice = ScriptedDice::new(vec![6; 12]);
        assert!(matches!(
            estimate_rtp(3, 1.0, &CoefficientTable::base(), &mut dice),
            Err(BalutError::RandomSourceFailure(_))
        ));
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let table = CoefficientTable::base();
        let a = estimate_rtp(5_000, 1.0, &table, &mut SeededDice::new(99)).unwrap();
        let b = estimate_rtp(5_000, 1.0, &table, &mut SeededDice::new(99)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_is_reproducible() {
        let config = SimConfig::quick().with_seed(2024).with_workers(4);
        let table = CoefficientTable::base();
        let a = estimate_parallel(&config, &table).unwrap();
        let b = estimate_parallel(&config, &table).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.trials(), 10_000);
    }

    #[test]
    fn test_parallel_uneven_chunks_cover_all_trials() {
        let config = SimConfig::default().with_trials(1_003).with_seed(5).with_workers(4);
        let result = estimate_parallel(&config, &CoefficientTable::base()).unwrap();
        assert_eq!(result.trials(), 1_003);
        let hits: u64 = CombinationCategory::ALL.iter().map(|&c| result.hits(c)).sum();
        assert_eq!(hits, 1_003);
    }

    #[test]
    fn test_estimate_near_analytical() {
        let table = CoefficientTable::base();
        let analytical = ProbabilityModel::closed_form().rtp_percent(&table);
        let result = estimate_rtp(100_000, 1.0, &table, &mut SeededDice::new(11)).unwrap();
        // stderr is about 0.24 pp at 1e5 trials
        assert!((result.rtp_percent() - analytical).abs() < 2.0);
    }

    #[test]
    fn test_standard_error_of_constant_payout_is_zero() {
        let table = CoefficientTable {
            balut: 1.0,
            straight: 1.0,
            full_house: 1.0,
            pair: 1.0,
            other: 1.0,
        };
        let result = estimate_rtp(1_000, 1.0, &table, &mut SeededDice::new(3)).unwrap();
        assert_abs_diff_eq!(result.rtp_percent(), 100.0, epsilon = 1e-9);
        assert_abs_diff_eq!(result.standard_error_percent(), 0.0, epsilon = 1e-6);
    }
}
