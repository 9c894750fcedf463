//! Flow test document schema.

use std::num::NonZeroUsize;

use chrono::{DateTime, Utc};
use hf_core::DistanceUnit;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowTestDocument {
    pub version: u32,
    pub test: FlowTestDef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<OptionsDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowTestDef {
    pub test_hydrant: HydrantDef,
    pub static_psi: f64,
    pub residual_psi: f64,
    #[serde(default)]
    pub flow_hydrants: Vec<FlowHydrantDef>,
    #[serde(default)]
    pub metadata: MetadataDef,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HydrantDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FlowHydrantDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lon: Option<f64>,
    #[serde(default)]
    pub outlets: Vec<OutletDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutletDef {
    pub diameter_in: f64,
    pub pitot_psi: f64,
    /// Omitted: customary value for the outlet size
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient: Option<CoefficientDef>,
}

/// Either a preset name (`smooth`, `square_sharp`, `square_projecting`) or a number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum CoefficientDef {
    Value(f64),
    Preset(String),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MetadataDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tested_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tester: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature_c: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Evaluation settings. Also used for command-line overrides.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct OptionsDef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_unit: Option<DistanceUnit>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curve_samples: Option<NonZeroUsize>,
}
