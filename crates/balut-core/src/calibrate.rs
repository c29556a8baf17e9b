//! Analytical calibration of the paytable to a target RTP

use serde::{Deserialize, Serialize};

use crate::error::{BalutError, BalutResult};
use crate::paytable::CoefficientTable;
use crate::probability::ProbabilityModel;

/// Result of calibrating a base table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Calibration {
    /// Target RTP as a fraction (e.g. 0.95)
    pub target_rtp: f64,
    /// Expected payout per unit of the base table
    pub base_rtp: f64,
    /// Uniform factor applied to the base coefficients
    pub scale: f64,
    /// Base coefficients × scale
    pub table: CoefficientTable,
}

impl Calibration {
    /// House edge implied by the target, as a fraction
    pub fn house_edge(&self) -> f64 {
        1.0 - self.target_rtp
    }
}

/// Check a target RTP fraction lies in (0, 1]
pub fn validate_target_rtp(target_rtp: f64) -> BalutResult<()> {
    if !target_rtp.is_finite() || target_rtp <= 0.0 || target_rtp > 1.0 {
        return Err(BalutError::InvalidInput(format!(
            "target RTP must be in (0, 1], got {target_rtp}"
        )));
    }
    Ok(())
}

/// Rescale `base` so its exact expected payout equals `target_rtp`.
///
/// Uses the closed-form probability model.
pub fn calibrate(target_rtp: f64, base: &CoefficientTable) -> BalutResult<Calibration> {
    calibrate_with(&ProbabilityModel::closed_form(), target_rtp, base)
}

/// Rescale `base` against an explicit probability model
pub fn calibrate_with(
    model: &ProbabilityModel,
    target_rtp: f64,
    base: &CoefficientTable,
) -> BalutResult<Calibration> {
    validate_target_rtp(target_rtp)?;
    base.validate()?;
    model.validate()?;

    let base_rtp = model.expected_payout(base);
    if !base_rtp.is_finite() || base_rtp <= 0.0 {
        return Err(BalutError::DegenerateConfiguration(format!(
            "base table has expected payout {base_rtp}; no scale factor reaches the target"
        )));
    }

    let scale = target_rtp / base_rtp;
    if !scale.is_finite() || scale <= 0.0 {
        return Err(BalutError::DegenerateConfiguration(format!(
            "scale {scale} from base RTP {base_rtp} is not usable"
        )));
    }
    log::debug!("calibrate: base RTP {base_rtp:.6}, target {target_rtp}, scale {scale:.6}");

    let table = base.scaled(scale);
    table
        .validate()
        .map_err(|e| BalutError::DegenerateConfiguration(format!("calibrated table: {e}")))?;

    Ok(Calibration {
        target_rtp,
        base_rtp,
        scale,
        table,
    })
}
