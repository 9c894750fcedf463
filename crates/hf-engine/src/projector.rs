//! Extrapolation of a measured flow to another residual pressure.
//!
//! Q_R = Q_F · ((S − target) / (S − R))^0.54

use hf_core::Real;

use crate::error::{CalculationError, check_finite};

/// Reference residual pressure at which available fire flow is rated (psi).
pub const REFERENCE_RESIDUAL_PSI: Real = 20.0;

/// Exponent of the Hazen-Williams flow/pressure-drop relation (1 / 1.85).
pub const FLOW_EXPONENT: Real = 0.54;

/// Flow obtainable when the residual drops to `target_psi`.
///
/// Defined for `residual_psi < static_psi` and `target_psi <= static_psi`;
/// at `target_psi == static_psi` the result is zero.
pub fn project_flow(
    measured_gpm: Real,
    static_psi: Real,
    residual_psi: Real,
    target_psi: Real,
) -> Result<Real, CalculationError> {
    let test_drop = static_psi - residual_psi;
    let target_drop = static_psi - target_psi;
    let defined = test_drop > 0.0 && target_drop >= 0.0;
    if !defined {
        return Err(CalculationError::UndefinedProjection {
            static_psi,
            residual_psi,
            target_psi,
        });
    }

    let ratio = check_finite(target_drop / test_drop, "pressure drop ratio")?;
    check_finite(measured_gpm * ratio.powf(FLOW_EXPONENT), "projected flow")
}

/// Available fire flow at the 20 psi reference residual.
pub fn available_fire_flow(
    measured_gpm: Real,
    static_psi: Real,
    residual_psi: Real,
) -> Result<Real, CalculationError> {
    if static_psi <= REFERENCE_RESIDUAL_PSI {
        return Err(CalculationError::StaticAtOrBelowReference {
            static_psi,
            reference_psi: REFERENCE_RESIDUAL_PSI,
        });
    }
    project_flow(measured_gpm, static_psi, residual_psi, REFERENCE_RESIDUAL_PSI)
}
