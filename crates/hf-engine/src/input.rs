//! Flow test input as handed over by the field-entry layer.

use chrono::{DateTime, Utc};
use hf_core::Real;

use crate::measurement::Measurement;

/// WGS84 coordinate pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub lat: Real,
    pub lon: Real,
}

impl GeoPoint {
    pub fn new(lat: Real, lon: Real) -> Self {
        Self { lat, lon }
    }
}

/// The hydrant where static and residual pressure are read.
#[derive(Debug, Clone, PartialEq)]
pub struct TestHydrant {
    pub id: String,
    pub location: Option<GeoPoint>,
}

/// A hydrant opened during the test, with one reading per open outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowHydrant {
    pub id: String,
    pub location: Option<GeoPoint>,
    pub outlets: Vec<Measurement>,
}

/// Context recorded alongside the readings. Never used in calculation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TestMetadata {
    pub tested_at: Option<DateTime<Utc>>,
    pub tester: Option<String>,
    pub weather: Option<String>,
    pub temperature_c: Option<Real>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlowTestInput {
    pub test_hydrant: TestHydrant,
    /// Pressure at the test hydrant before any flow (psi)
    pub static_psi: Real,
    /// Pressure at the test hydrant while flowing (psi)
    pub residual_psi: Real,
    /// Ordered flow hydrants, 1 to 3
    pub flow_hydrants: Vec<FlowHydrant>,
    pub metadata: TestMetadata,
}

impl FlowTestInput {
    /// All outlet readings in hydrant order, tagged with (hydrant, outlet) indices.
    pub fn measurements(&self) -> impl Iterator<Item = (usize, usize, &Measurement)> {
        self.flow_hydrants
            .iter()
            .enumerate()
            .flat_map(|(h, hydrant)| {
                hydrant
                    .outlets
                    .iter()
                    .enumerate()
                    .map(move |(o, m)| (h, o, m))
            })
    }

    pub fn outlet_count(&self) -> usize {
        self.flow_hydrants.iter().map(|h| h.outlets.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurement::Coefficient;

    #[test]
    fn measurements_are_tagged_in_order() {
        let reading = Measurement::new(2.5, Coefficient::Smooth, 40.0);
        let input = FlowTestInput {
            test_hydrant: TestHydrant {
                id: "T".into(),
                location: None,
            },
            static_psi: 70.0,
            residual_psi: 50.0,
            flow_hydrants: vec![
                FlowHydrant {
                    id: "F1".into(),
                    location: None,
                    outlets: vec![reading, reading],
                },
                FlowHydrant {
                    id: "F2".into(),
                    location: None,
                    outlets: vec![reading],
                },
            ],
            metadata: TestMetadata::default(),
        };

        let tags: Vec<(usize, usize)> = input.measurements().map(|(h, o, _)| (h, o)).collect();
        assert_eq!(tags, vec![(0, 0), (0, 1), (1, 0)]);
        assert_eq!(input.outlet_count(), 3);
    }
}
