//! The evaluation pipeline: validate, compute outlets, aggregate, project,
//! classify, and sample the supply curve.

use std::num::NonZeroUsize;

use hf_core::{DistanceUnit, Real};
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::aggregate::{HydrantDistance, hydrant_distances, total_flow_gpm};
use crate::classify::{NfpaClass, classify};
use crate::curve::{SupplyCurvePoint, supply_curve};
use crate::error::EngineResult;
use crate::input::FlowTestInput;
use crate::outlet::{OutletFlowResult, outlet_flows};
use crate::projector::available_fire_flow;
use crate::quality::{QualityReport, assess};
use crate::validate::validate_input;

pub const DEFAULT_CURVE_SAMPLES: NonZeroUsize = match NonZeroUsize::new(20) {
    Some(n) => n,
    None => unreachable!(),
};

/// Per-call settings. There is no other configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EvaluateOptions {
    pub distance_unit: DistanceUnit,
    pub curve_samples: NonZeroUsize,
}

impl Default for EvaluateOptions {
    fn default() -> Self {
        Self {
            distance_unit: DistanceUnit::Feet,
            curve_samples: DEFAULT_CURVE_SAMPLES,
        }
    }
}

/// Complete outcome of one flow test. Built only when every stage succeeds.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowTestResult {
    pub outlet_flows: Vec<OutletFlowResult>,
    pub total_flow_gpm: Real,
    /// Projected flow at the 20 psi reference residual
    pub available_flow_gpm: Real,
    pub class: NfpaClass,
    pub distances: Vec<HydrantDistance>,
    pub supply_curve: Vec<SupplyCurvePoint>,
    pub static_psi: Real,
    pub residual_psi: Real,
    pub pressure_drop_psi: Real,
    pub quality: QualityReport,
}

/// Evaluate one flow test.
///
/// Fails with a validation error listing every bad field, or with a
/// calculation error when the static pressure cannot support a projection to
/// the 20 psi reference.
pub fn evaluate(input: &FlowTestInput, options: &EvaluateOptions) -> EngineResult<FlowTestResult> {
    let input = validate_input(input)?;

    let outlet_flows = outlet_flows(input);
    let total_flow_gpm = total_flow_gpm(&outlet_flows);
    debug!(
        test_hydrant = %input.test_hydrant.id,
        outlets = outlet_flows.len(),
        total_flow_gpm,
        "aggregated outlet flows"
    );

    let available_flow_gpm =
        available_fire_flow(total_flow_gpm, input.static_psi, input.residual_psi)?;
    let class = classify(available_flow_gpm);
    debug!(available_flow_gpm, class = %class, "projected to reference residual");

    let supply_curve = supply_curve(
        total_flow_gpm,
        input.static_psi,
        input.residual_psi,
        options.curve_samples,
    )?;
    let distances = hydrant_distances(input, options.distance_unit);

    let quality = assess(input, total_flow_gpm);
    if quality.is_clean() {
        debug!(test_hydrant = %input.test_hydrant.id, "no data quality warnings");
    }
    for warning in &quality.warnings {
        warn!(test_hydrant = %input.test_hydrant.id, "{}", warning);
    }

    Ok(FlowTestResult {
        outlet_flows,
        total_flow_gpm,
        available_flow_gpm,
        class,
        distances,
        supply_curve,
        static_psi: input.static_psi,
        residual_psi: input.residual_psi,
        pressure_drop_psi: input.static_psi - input.residual_psi,
        quality,
    })
}

/// Evaluate independent tests in parallel. Results keep input order.
pub fn evaluate_many(
    inputs: &[FlowTestInput],
    options: &EvaluateOptions,
) -> Vec<EngineResult<FlowTestResult>> {
    let results: Vec<_> = inputs.par_iter().map(|input| evaluate(input, options)).collect();
    let failed = results.iter().filter(|r| r.is_err()).count();
    info!(tests = inputs.len(), failed, "batch evaluation finished");
    results
}
