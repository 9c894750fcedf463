//! Field data quality checks.
//!
//! Warnings never block an evaluation or change the class; they tell the
//! tester which readings deserve a second look before the result is filed.

use std::fmt;

use hf_core::Real;

use crate::input::FlowTestInput;
use crate::projector::REFERENCE_RESIDUAL_PSI;

pub const LOW_RESIDUAL_PSI: Real = 10.0;
pub const LOW_TOTAL_FLOW_GPM: Real = 100.0;
pub const HIGH_TOTAL_FLOW_GPM: Real = 5000.0;
/// Minimum drop between static and residual for a reliable projection.
pub const MIN_PRESSURE_DROP_PSI: Real = 10.0;
/// Largest drop, as a fraction of static, before a restriction is suspected.
pub const MAX_PRESSURE_DROP_FRACTION: Real = 0.8;

const POINTS_PER_WARNING: u8 = 15;

#[derive(Debug, Clone, PartialEq)]
pub enum QualityWarning {
    LowResidual { residual_psi: Real },
    ResidualAtOrBelowReference { residual_psi: Real },
    LowTotalFlow { total_gpm: Real },
    HighTotalFlow { total_gpm: Real },
    ExcessivePressureDrop { drop_psi: Real, static_psi: Real },
    SmallPressureDrop { drop_psi: Real },
    UnusualCoefficient { field: String, coefficient: Real },
}

impl fmt::Display for QualityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LowResidual { residual_psi } => write!(
                f,
                "residual pressure {residual_psi:.1} psi is very low; the main may be stressed"
            ),
            Self::ResidualAtOrBelowReference { residual_psi } => write!(
                f,
                "residual pressure {residual_psi:.1} psi is at or below the {REFERENCE_RESIDUAL_PSI} psi reference"
            ),
            Self::LowTotalFlow { total_gpm } => write!(
                f,
                "total flow {total_gpm:.0} gpm is very low; check outlet conditions"
            ),
            Self::HighTotalFlow { total_gpm } => write!(
                f,
                "total flow {total_gpm:.0} gpm is unusually high; verify pitot readings"
            ),
            Self::ExcessivePressureDrop {
                drop_psi,
                static_psi,
            } => write!(
                f,
                "pressure drop {drop_psi:.1} psi exceeds 80% of static {static_psi:.1} psi; possible restriction"
            ),
            Self::SmallPressureDrop { drop_psi } => write!(
                f,
                "pressure drop {drop_psi:.1} psi is under {MIN_PRESSURE_DROP_PSI} psi; open more outlets for a reliable projection"
            ),
            Self::UnusualCoefficient { field, coefficient } => write!(
                f,
                "{field} = {coefficient:.2} is outside the customary 0.70-0.90 range"
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QualityReport {
    pub warnings: Vec<QualityWarning>,
    /// 100 for a clean test, minus 15 per warning, floored at 0
    pub score: u8,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

/// Assess a validated test given its total measured flow.
pub fn assess(input: &FlowTestInput, total_gpm: Real) -> QualityReport {
    let mut warnings = Vec::new();
    let drop_psi = input.static_psi - input.residual_psi;

    if input.residual_psi < LOW_RESIDUAL_PSI {
        warnings.push(QualityWarning::LowResidual {
            residual_psi: input.residual_psi,
        });
    }
    if input.residual_psi <= REFERENCE_RESIDUAL_PSI {
        warnings.push(QualityWarning::ResidualAtOrBelowReference {
            residual_psi: input.residual_psi,
        });
    }
    if total_gpm < LOW_TOTAL_FLOW_GPM {
        warnings.push(QualityWarning::LowTotalFlow { total_gpm });
    }
    if total_gpm > HIGH_TOTAL_FLOW_GPM {
        warnings.push(QualityWarning::HighTotalFlow { total_gpm });
    }
    if drop_psi > MAX_PRESSURE_DROP_FRACTION * input.static_psi {
        warnings.push(QualityWarning::ExcessivePressureDrop {
            drop_psi,
            static_psi: input.static_psi,
        });
    }
    if drop_psi < MIN_PRESSURE_DROP_PSI {
        warnings.push(QualityWarning::SmallPressureDrop { drop_psi });
    }
    for (h, o, m) in input.measurements() {
        if !m.coefficient.is_typical() {
            warnings.push(QualityWarning::UnusualCoefficient {
                field: format!("flow_hydrants[{h}].outlets[{o}].coefficient"),
                coefficient: m.coefficient.value(),
            });
        }
    }

    let penalty = warnings.len().saturating_mul(POINTS_PER_WARNING as usize);
    let score = 100usize.saturating_sub(penalty) as u8;

    QualityReport { warnings, score }
}
