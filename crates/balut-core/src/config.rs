//! Game configuration

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::calibrate::validate_target_rtp;
use crate::error::{BalutError, BalutResult};
use crate::paytable::CoefficientTable;

fn default_target_rtp() -> f64 {
    0.95 // 5% house edge
}

/// Paytable and RTP target for a game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Base coefficients before calibration
    #[serde(default)]
    pub coefficients: CoefficientTable,

    /// Target RTP as a fraction in (0, 1]
    #[serde(default = "default_target_rtp")]
    pub target_rtp: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            coefficients: CoefficientTable::base(),
            target_rtp: default_target_rtp(),
        }
    }
}

impl GameConfig {
    /// Builder: set target RTP
    pub fn with_target_rtp(mut self, target_rtp: f64) -> Self {
        self.target_rtp = target_rtp;
        self
    }

    pub fn validate(&self) -> BalutResult<()> {
        self.coefficients.validate()?;
        validate_target_rtp(self.target_rtp)
    }
}

/// Read a `.yaml`, `.yml` or `.json` file into any config type
pub fn load_config<T: DeserializeOwned>(path: &Path) -> BalutResult<T> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let text = fs::read_to_string(path)?;
    match extension.as_deref() {
        Some("yaml") | Some("yml") => Ok(serde_yml::from_str(&text)?),
        Some("json") => Ok(serde_json::from_str(&text)?),
        _ => Err(BalutError::InvalidInput(format!(
            "unsupported config format: {}",
            path.display()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = GameConfig::default();
        assert_eq!(config.coefficients, CoefficientTable::base());
        assert_eq!(config.target_rtp, 0.95);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: GameConfig = serde_yml::from_str("target_rtp: 0.97\n").unwrap();
        assert_eq!(config.target_rtp, 0.97);
        assert_eq!(config.coefficients, CoefficientTable::base());
    }

    #[test]
    fn test_target_builder_is_validated() {
        let config = GameConfig::default().with_target_rtp(1.5);
        assert!(matches!(config.validate(), Err(BalutError::InvalidInput(_))));
    }

    #[test]
    fn test_load_config_by_extension() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path();

        let yaml = dir.join("game.yml");
        fs::write(&yaml, "target_rtp: 0.9\n").unwrap();
        let config: GameConfig = load_config(&yaml).unwrap();
        assert_eq!(config.target_rtp, 0.9);

        let json = dir.join("game.json");
        fs::write(&json, "not json").unwrap();
        assert!(matches!(
            load_config::<GameConfig>(&json),
            Err(BalutError::Serialization(_))
        ));

        let toml = dir.join("game.toml");
        fs::write(&toml, "x = 1").unwrap();
        assert!(matches!(
            load_config::<GameConfig>(&toml),
            Err(BalutError::InvalidInput(_))
        ));

        assert!(matches!(
            load_config::<GameConfig>(&dir.join("missing.yaml")),
            Err(BalutError::Io(_))
        ));
    }
}
