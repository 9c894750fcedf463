//! Input validation.
//!
//! Every check runs on every call and all failures are reported together, so
//! a field form can highlight each bad entry in one round trip.

use hf_core::Real;

use crate::error::{FieldIssue, ValidationError};
use crate::input::{FlowTestInput, GeoPoint};
use crate::measurement::Measurement;

pub const MIN_FLOW_HYDRANTS: usize = 1;
pub const MAX_FLOW_HYDRANTS: usize = 3;

/// Check a flow test and hand it back untouched if it is well formed.
pub fn validate_input(input: &FlowTestInput) -> Result<&FlowTestInput, ValidationError> {
    let mut issues = Issues::default();

    for (h, o, m) in input.measurements() {
        issues.positive(outlet_field(h, o, "diameter_in"), m.diameter_in);
    }
    for (h, o, m) in input.measurements() {
        issues.coefficient(outlet_field(h, o, "coefficient"), m.coefficient.value());
    }
    for (h, o, m) in input.measurements() {
        issues.non_negative(outlet_field(h, o, "pitot_psi"), m.pitot_psi);
    }

    issues.positive("static_psi".to_string(), input.static_psi);
    issues.non_negative("residual_psi".to_string(), input.residual_psi);
    if input.static_psi.is_finite()
        && input.residual_psi.is_finite()
        && input.residual_psi >= input.static_psi
    {
        issues.push(
            "residual_psi",
            input.residual_psi,
            format!("must be less than static pressure ({} psi)", input.static_psi),
        );
    }

    let count = input.flow_hydrants.len();
    if !(MIN_FLOW_HYDRANTS..=MAX_FLOW_HYDRANTS).contains(&count) {
        issues.push(
            "flow_hydrants",
            count,
            format!("must have between {MIN_FLOW_HYDRANTS} and {MAX_FLOW_HYDRANTS} entries"),
        );
    }
    for (h, hydrant) in input.flow_hydrants.iter().enumerate() {
        if hydrant.outlets.is_empty() {
            issues.push(
                format!("flow_hydrants[{h}].outlets"),
                0,
                "must have at least one outlet reading",
            );
        }
    }

    if let Some(point) = input.test_hydrant.location {
        issues.coordinates("test_hydrant.location", point);
    }
    for (h, hydrant) in input.flow_hydrants.iter().enumerate() {
        if let Some(point) = hydrant.location {
            issues.coordinates(&format!("flow_hydrants[{h}].location"), point);
        }
    }

    issues.finish(input)
}

/// Check a single outlet reading on its own, as for a one-off pitot lookup.
pub fn validate_measurement(measurement: &Measurement) -> Result<&Measurement, ValidationError> {
    let mut issues = Issues::default();
    issues.positive("diameter_in".to_string(), measurement.diameter_in);
    issues.coefficient("coefficient".to_string(), measurement.coefficient.value());
    issues.non_negative("pitot_psi".to_string(), measurement.pitot_psi);
    issues.finish(measurement)
}

fn outlet_field(hydrant: usize, outlet: usize, name: &str) -> String {
    format!("flow_hydrants[{hydrant}].outlets[{outlet}].{name}")
}

#[derive(Default)]
struct Issues(Vec<FieldIssue>);

impl Issues {
    fn push(
        &mut self,
        field: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) {
        self.0.push(FieldIssue::new(field, value, reason));
    }

    fn positive(&mut self, field: String, value: Real) {
        if !value.is_finite() || value <= 0.0 {
            self.push(field, value, "must be positive and finite");
        }
    }

    fn non_negative(&mut self, field: String, value: Real) {
        if !value.is_finite() || value < 0.0 {
            self.push(field, value, "must be non-negative and finite");
        }
    }

    fn coefficient(&mut self, field: String, c: Real) {
        if !c.is_finite() || c <= 0.0 || c > 1.0 {
            self.push(field, c, "must be in (0, 1]");
        }
    }

    fn coordinates(&mut self, prefix: &str, point: GeoPoint) {
        if !point.lat.is_finite() || !(-90.0..=90.0).contains(&point.lat) {
            self.push(format!("{prefix}.lat"), point.lat, "must be in [-90, 90]");
        }
        if !point.lon.is_finite() || !(-180.0..=180.0).contains(&point.lon) {
            self.push(format!("{prefix}.lon"), point.lon, "must be in [-180, 180]");
        }
    }

    fn finish<T>(self, checked: T) -> Result<T, ValidationError> {
        if self.0.is_empty() {
            Ok(checked)
        } else {
            Err(ValidationError { issues: self.0 })
        }
    }
}
