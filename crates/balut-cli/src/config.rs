//! Config file loading

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use balut_core::{GameConfig, load_config};
use balut_sim::SimConfig;

/// Everything a config file may set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalutConfig {
    pub game: GameConfig,
    pub simulation: SimConfig,
}

impl BalutConfig {
    /// Load from `.yaml`, `.yml` or `.json`
    pub fn load(path: &Path) -> Result<Self> {
        let config: Self = load_config(path)
            .with_context(|| format!("Failed to load config {}", path.display()))?;

        config.game.validate()?;
        config.simulation.validate()?;
        log::info!("Loaded config {}", path.display());
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use balut_core::CoefficientTable;
    use std::fs;

    #[test]
    fn test_load_yaml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balut.yaml");
        fs::write(
            &path,
            "game:\n  target_rtp: 0.9\nsimulation:\n  trials: 2000\n  seed: 4\n",
        )
        .unwrap();

        let config = BalutConfig::load(&path).unwrap();
        assert_eq!(config.game.target_rtp, 0.9);
        assert_eq!(config.game.coefficients, CoefficientTable::base());
        assert_eq!(config.simulation.trials, 2000);
        assert_eq!(config.simulation.seed, Some(4));
    }

    #[test]
    fn test_load_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("balut.json");
        fs::write(
            &path,
            r#"{"game": {"coefficients": {"balut": 8, "straight": 5, "full_house": 3, "pair": 2, "other": 0}}}"#,
        )
        .unwrap();

        let config = BalutConfig::load(&path).unwrap();
        assert_eq!(config.game.coefficients.balut, 8.0);
        assert_eq!(config.simulation, SimConfig::default());
    }

    #[test]
    fn test_rejects_invalid_values_and_formats() {
        let dir = tempfile::tempdir().unwrap();
        let bad_rtp = dir.path().join("bad.yaml");
        fs::write(&bad_rtp, "game:\n  target_rtp: 2.0\n").unwrap();
        assert!(BalutConfig::load(&bad_rtp).is_err());

        let toml = dir.path().join("balut.toml");
        fs::write(&toml, "x = 1").unwrap();
        assert!(BalutConfig::load(&toml).is_err());
    }
}
