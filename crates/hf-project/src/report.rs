//! Presentation records.
//!
//! The engine keeps full precision; rounding happens here and only here.
//! Flows and distances are whole units, pressures carry one decimal.

use chrono::{DateTime, Utc};
use hf_core::DistanceUnit;
use hf_engine::FlowTestResult;
use serde::{Deserialize, Serialize};

use crate::schema::FlowTestDef;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowTestReport {
    pub fingerprint: String,
    pub test_hydrant_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tested_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    pub static_psi: f64,
    pub residual_psi: f64,
    pub pressure_drop_psi: f64,
    pub total_flow_gpm: f64,
    pub available_flow_gpm: f64,
    pub nfpa_class: String,
    pub class_color: String,
    pub class_color_hex: String,
    pub class_description: String,
    pub outlets: Vec<OutletReport>,
    pub distances: Vec<DistanceReport>,
    pub supply_curve: Vec<CurvePointReport>,
    pub quality_score: u8,
    #[serde(default)]
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutletReport {
    pub hydrant_id: String,
    /// 1-based, as painted on the hydrant sheet
    pub outlet: usize,
    pub diameter_in: f64,
    pub coefficient: f64,
    pub pitot_psi: f64,
    pub flow_gpm: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DistanceReport {
    pub hydrant_id: String,
    pub distance: Option<f64>,
    pub unit: DistanceUnit,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurvePointReport {
    pub pressure_psi: f64,
    pub flow_gpm: f64,
}

impl FlowTestReport {
    pub fn from_result(def: &FlowTestDef, result: &FlowTestResult, fingerprint: String) -> Self {
        let outlets = result
            .outlet_flows
            .iter()
            .map(|o| OutletReport {
                hydrant_id: def
                    .flow_hydrants
                    .get(o.hydrant_index)
                    .map(|h| h.id.clone())
                    .unwrap_or_default(),
                outlet: o.outlet_index + 1,
                diameter_in: o.measurement.diameter_in,
                coefficient: o.measurement.coefficient.value(),
                pitot_psi: round_to(o.measurement.pitot_psi, 1),
                flow_gpm: round_to(o.flow_gpm, 0),
            })
            .collect();

        let distances = result
            .distances
            .iter()
            .map(|d| DistanceReport {
                hydrant_id: d.hydrant_id.clone(),
                distance: d.distance.map(|v| round_to(v, 0)),
                unit: d.unit,
            })
            .collect();

        let supply_curve = result
            .supply_curve
            .iter()
            .map(|p| CurvePointReport {
                pressure_psi: round_to(p.pressure_psi, 1),
                flow_gpm: round_to(p.flow_gpm, 0),
            })
            .collect();

        Self {
            fingerprint,
            test_hydrant_id: def.test_hydrant.id.clone(),
            tested_at: def.metadata.tested_at,
            tester: def.metadata.tester.clone(),
            weather: def.metadata.weather.clone(),
            static_psi: round_to(result.static_psi, 1),
            residual_psi: round_to(result.residual_psi, 1),
            pressure_drop_psi: round_to(result.pressure_drop_psi, 1),
            total_flow_gpm: round_to(result.total_flow_gpm, 0),
            available_flow_gpm: round_to(result.available_flow_gpm, 0),
            nfpa_class: result.class.label().to_string(),
            class_color: result.class.color_name().to_string(),
            class_color_hex: result.class.color_hex().to_string(),
            class_description: result.class.description().to_string(),
            outlets,
            distances,
            supply_curve,
            quality_score: result.quality.score,
            warnings: result.quality.warnings.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Round half away from zero to `decimals` places.
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

/// Supply curve as CSV with a header row, full precision.
pub fn supply_curve_csv(result: &FlowTestResult) -> String {
    let mut csv = String::from("pressure_psi,flow_gpm,flow_n185\n");
    for point in &result.supply_curve {
        csv.push_str(&format!(
            "{},{},{}\n",
            point.pressure_psi,
            point.flow_gpm,
            point.flow_n185()
        ));
    }
    csv
}
