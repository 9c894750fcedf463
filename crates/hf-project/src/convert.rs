//! Document to engine input conversion.

use hf_engine::{
    Coefficient, FieldIssue, FlowHydrant, FlowTestInput, GeoPoint, Measurement, TestHydrant,
    TestMetadata, ValidationError,
};

use crate::schema::{CoefficientDef, FlowTestDef, MetadataDef, OutletDef};

impl FlowTestDef {
    /// Build the engine input.
    ///
    /// Fails on problems only the document can have: an unknown coefficient
    /// preset, or a latitude without a longitude (or the reverse). Value range
    /// checks are left to the engine.
    pub fn to_input(&self) -> Result<FlowTestInput, ValidationError> {
        let mut issues = Vec::new();

        let test_location = location(
            "test_hydrant",
            self.test_hydrant.lat,
            self.test_hydrant.lon,
            &mut issues,
        );

        let flow_hydrants = self
            .flow_hydrants
            .iter()
            .enumerate()
            .map(|(h, hydrant)| {
                let prefix = format!("flow_hydrants[{h}]");
                FlowHydrant {
                    id: hydrant.id.clone(),
                    location: location(&prefix, hydrant.lat, hydrant.lon, &mut issues),
                    outlets: hydrant
                        .outlets
                        .iter()
                        .enumerate()
                        .map(|(o, outlet)| {
                            measurement(&format!("{prefix}.outlets[{o}]"), outlet, &mut issues)
                        })
                        .collect(),
                }
            })
            .collect();

        if !issues.is_empty() {
            return Err(ValidationError { issues });
        }

        Ok(FlowTestInput {
            test_hydrant: TestHydrant {
                id: self.test_hydrant.id.clone(),
                location: test_location,
            },
            static_psi: self.static_psi,
            residual_psi: self.residual_psi,
            flow_hydrants,
            metadata: metadata(&self.metadata),
        })
    }
}

fn location(
    prefix: &str,
    lat: Option<f64>,
    lon: Option<f64>,
    issues: &mut Vec<FieldIssue>,
) -> Option<GeoPoint> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Some(GeoPoint::new(lat, lon)),
        (None, None) => None,
        (Some(lat), None) => {
            issues.push(FieldIssue::new(
                format!("{prefix}.lon"),
                "missing",
                format!("required when lat ({lat}) is given"),
            ));
            None
        }
        (None, Some(lon)) => {
            issues.push(FieldIssue::new(
                format!("{prefix}.lat"),
                "missing",
                format!("required when lon ({lon}) is given"),
            ));
            None
        }
    }
}

fn measurement(prefix: &str, outlet: &OutletDef, issues: &mut Vec<FieldIssue>) -> Measurement {
    let coefficient = match &outlet.coefficient {
        None => Coefficient::default_for_diameter(outlet.diameter_in),
        Some(CoefficientDef::Value(c)) => Coefficient::Custom(*c),
        Some(CoefficientDef::Preset(name)) => Coefficient::from_name(name).unwrap_or_else(|| {
            issues.push(FieldIssue::new(
                format!("{prefix}.coefficient"),
                name,
                "unknown preset (expected smooth, square_sharp or square_projecting)",
            ));
            Coefficient::Smooth
        }),
    };
    Measurement::new(outlet.diameter_in, coefficient, outlet.pitot_psi)
}

fn metadata(def: &MetadataDef) -> TestMetadata {
    TestMetadata {
        tested_at: def.tested_at,
        tester: def.tester.clone(),
        weather: def.weather.clone(),
        temperature_c: def.temperature_c,
        notes: def.notes.clone(),
    }
}
