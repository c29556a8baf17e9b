//! Simulation configuration

use serde::{Deserialize, Serialize};

use balut_core::{BalutError, BalutResult};

/// Configuration for an estimation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of rounds to play
    pub trials: u64,

    /// Stake per round
    pub bet_amount: f64,

    /// Random seed for reproducibility (None = OS entropy)
    pub seed: Option<u64>,

    /// Parallel chunks (None = one per CPU)
    pub workers: Option<usize>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            trials: 1_000_000,
            bet_amount: 1.0,
            seed: None,
            workers: None,
        }
    }
}

impl SimConfig {
    /// Small run for smoke checks
    pub fn quick() -> Self {
        Self {
            trials: 10_000,
            ..Default::default()
        }
    }

    /// Long run for tight estimates
    pub fn thorough() -> Self {
        Self {
            trials: 10_000_000,
            ..Default::default()
        }
    }

    /// Builder: set trials
    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    /// Builder: set stake per round
    pub fn with_bet_amount(mut self, bet_amount: f64) -> Self {
        self.bet_amount = bet_amount;
        self
    }

    /// Builder: set seed for reproducibility
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builder: set parallel chunk count
    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// Chunk count actually used for a run
    pub fn effective_workers(&self) -> usize {
        let workers = self.workers.unwrap_or_else(num_cpus::get).max(1);
        // never more chunks than trials
        workers.min(self.trials.max(1) as usize)
    }

    pub fn validate(&self) -> BalutResult<()> {
        validate_run(self.trials, self.bet_amount)?;
        if self.workers == Some(0) {
            return Err(BalutError::InvalidInput("workers must be at least 1".into()));
        }
        Ok(())
    }
}

/// Check trial count and stake
pub(crate) fn validate_run(trials: u64, bet_amount: f64) -> BalutResult<()> {
    if trials == 0 {
        return Err(BalutError::InvalidInput("number of trials must be positive".into()));
    }
    if !bet_amount.is_finite() || bet_amount <= 0.0 {
        return Err(BalutError::InvalidInput(format!(
            "bet amount must be finite and positive, got {bet_amount}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SimConfig::default();
        assert_eq!(config.trials, 1_000_000);
        assert_eq!(config.bet_amount, 1.0);
        assert!(config.seed.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = SimConfig::quick().with_seed(42).with_workers(3).with_bet_amount(2.5);
        assert_eq!(config.trials, 10_000);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.effective_workers(), 3);
        assert_eq!(config.bet_amount, 2.5);
    }

    #[test]
    fn test_workers_capped_by_trials() {
        let config = SimConfig::default().with_trials(2).with_workers(8);
        assert_eq!(config.effective_workers(), 2);
    }

    #[test]
    fn test_validate_rejects_bad_runs() {
        assert!(SimConfig::default().with_trials(0).validate().is_err());
        assert!(SimConfig::default().with_bet_amount(0.0).validate().is_err());
        assert!(SimConfig::default().with_bet_amount(f64::NAN).validate().is_err());
        assert!(SimConfig::default().with_workers(0).validate().is_err());
    }

    #[test]
    fn test_partial_json() {
        let config: SimConfig = serde_json::from_str(r#"{"trials": 500, "seed": 9}"#).unwrap();
        assert_eq!(config.trials, 500);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.bet_amount, 1.0);
    }
}
