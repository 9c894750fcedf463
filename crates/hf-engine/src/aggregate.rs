//! Totals across flow hydrants and hydrant spacing.

use hf_core::units::{Length, constants};
use hf_core::{DistanceUnit, Real};

use crate::input::{FlowTestInput, GeoPoint};
use crate::outlet::OutletFlowResult;

/// Distance from the test hydrant to one flow hydrant.
#[derive(Debug, Clone, PartialEq)]
pub struct HydrantDistance {
    pub hydrant_id: String,
    /// `None` when either hydrant has no recorded coordinates
    pub distance: Option<Real>,
    pub unit: DistanceUnit,
}

/// Total measured flow: the plain sum of every outlet flow.
pub fn total_flow_gpm(outlets: &[OutletFlowResult]) -> Real {
    outlets.iter().map(|o| o.flow_gpm).sum()
}

/// Great-circle distance between two coordinates (haversine).
pub fn great_circle_distance(a: GeoPoint, b: GeoPoint) -> Length {
    let phi1 = a.lat.to_radians();
    let phi2 = b.lat.to_radians();
    let d_phi = (b.lat - a.lat).to_radians();
    let d_lambda = (b.lon - a.lon).to_radians();

    let h = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push h a hair past 1 for antipodal points
    let h = h.clamp(0.0, 1.0);
    let central_angle = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    constants::earth_radius() * central_angle
}

/// Distance to each flow hydrant, in input order.
pub fn hydrant_distances(input: &FlowTestInput, unit: DistanceUnit) -> Vec<HydrantDistance> {
    let origin = input.test_hydrant.location;
    input
        .flow_hydrants
        .iter()
        .map(|hydrant| HydrantDistance {
            hydrant_id: hydrant.id.clone(),
            distance: origin
                .zip(hydrant.location)
                .map(|(a, b)| unit.value_of(great_circle_distance(a, b))),
            unit,
        })
        .collect()
}
