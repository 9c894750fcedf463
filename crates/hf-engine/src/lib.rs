//! hf-engine: NFPA 291 hydrant flow test calculations.
//!
//! Turns raw field readings into a rated flow and hydrant class:
//! - validate: collects every malformed field in one pass
//! - outlet: pitot flow per outlet, Q = 29.83 · c · d² · √P
//! - aggregate: total measured flow and hydrant spacing (haversine)
//! - projector: available fire flow at 20 psi residual, exponent 0.54
//! - classify: AA / A / B / C buckets
//! - curve: water supply curve samples for N^1.85 plots
//! - quality: non-fatal data quality warnings
//!
//! Every function is pure; evaluations share no state and may run in
//! parallel (see [`evaluate_many`]).
//!
//! # Example
//!
//! ```
//! use hf_engine::{
//!     evaluate, Coefficient, EvaluateOptions, FlowHydrant, FlowTestInput, Measurement,
//!     NfpaClass, TestHydrant, TestMetadata,
//! };
//!
//! let input = FlowTestInput {
//!     test_hydrant: TestHydrant { id: "H-001".into(), location: None },
//!     static_psi: 80.0,
//!     residual_psi: 60.0,
//!     flow_hydrants: vec![FlowHydrant {
//!         id: "H-002".into(),
//!         location: None,
//!         outlets: vec![Measurement::new(2.5, Coefficient::Smooth, 50.0)],
//!     }],
//!     metadata: TestMetadata::default(),
//! };
//!
//! let result = evaluate(&input, &EvaluateOptions::default()).unwrap();
//! assert_eq!(result.class, NfpaClass::AA);
//! println!("Available fire flow: {:.0} gpm", result.available_flow_gpm);
//! ```

pub mod aggregate;
pub mod classify;
pub mod curve;
pub mod engine;
pub mod error;
pub mod input;
pub mod measurement;
pub mod outlet;
pub mod projector;
pub mod quality;
pub mod validate;

// Re-exports
pub use hf_core::DistanceUnit;
pub use aggregate::{HydrantDistance, great_circle_distance, hydrant_distances, total_flow_gpm};
pub use classify::{NfpaClass, classify};
pub use curve::{SupplyCurvePoint, supply_curve};
pub use engine::{DEFAULT_CURVE_SAMPLES, EvaluateOptions, FlowTestResult, evaluate, evaluate_many};
pub use error::{CalculationError, EngineError, EngineResult, FieldIssue, ValidationError};
pub use input::{FlowHydrant, FlowTestInput, GeoPoint, TestHydrant, TestMetadata};
pub use measurement::{Coefficient, Measurement};
pub use outlet::{OutletFlowResult, outlet_flow_gpm, outlet_flows};
pub use projector::{FLOW_EXPONENT, REFERENCE_RESIDUAL_PSI, available_fire_flow, project_flow};
pub use quality::{QualityReport, QualityWarning};
pub use validate::{validate_input, validate_measurement};
