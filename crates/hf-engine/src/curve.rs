//! Water supply curve sampling for N^1.85 plots.

use std::num::NonZeroUsize;

use hf_core::Real;
use hf_core::numeric::linspace;

use crate::error::CalculationError;
use crate::projector::project_flow;

/// Abscissa exponent of hydraulic graph paper.
pub const N185_EXPONENT: Real = 1.85;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SupplyCurvePoint {
    /// Candidate residual pressure (psi)
    pub pressure_psi: Real,
    /// Flow available at that residual (gpm)
    pub flow_gpm: Real,
}

impl SupplyCurvePoint {
    /// Flow raised to 1.85, the linearising axis of N^1.85 paper.
    pub fn flow_n185(&self) -> Real {
        self.flow_gpm.powf(N185_EXPONENT)
    }
}

/// Sample the supply curve from the test residual up to static pressure,
/// both ends included, in non-decreasing pressure order.
///
/// Pressures are strictly ascending unless the drop S − R is finer than the
/// float spacing at that pressure, in which case neighbouring samples repeat.
///
/// The first point reproduces the measured flow and the last is zero flow at
/// static pressure.
pub fn supply_curve(
    measured_gpm: Real,
    static_psi: Real,
    residual_psi: Real,
    samples: NonZeroUsize,
) -> Result<Vec<SupplyCurvePoint>, CalculationError> {
    linspace(residual_psi, static_psi, samples.get())
        .into_iter()
        .map(|pressure_psi| {
            project_flow(measured_gpm, static_psi, residual_psi, pressure_psi).map(|flow_gpm| {
                SupplyCurvePoint {
                    pressure_psi,
                    flow_gpm,
                }
            })
        })
        .collect()
}
