//! Pitot flow at a single outlet.

use hf_core::Real;

use crate::input::FlowTestInput;
use crate::measurement::Measurement;

/// Constant of the pitot flow formula for GPM, inches and psi.
pub const OUTLET_FLOW_CONSTANT: Real = 29.83;

/// Flow computed for one recorded reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutletFlowResult {
    /// Position of the flow hydrant in the test
    pub hydrant_index: usize,
    /// Position of the outlet on that hydrant
    pub outlet_index: usize,
    pub measurement: Measurement,
    pub flow_gpm: Real,
}

/// Q = 29.83 · c · d² · √P
///
/// A zero pitot reading (closed outlet) yields exactly zero, whatever the
/// outlet size.
pub fn outlet_flow_gpm(measurement: &Measurement) -> Real {
    if measurement.pitot_psi == 0.0 {
        return 0.0;
    }
    let d = measurement.diameter_in;
    OUTLET_FLOW_CONSTANT * measurement.coefficient.value() * d * d * measurement.pitot_psi.sqrt()
}

/// Flow for every reading in the test, in hydrant then outlet order.
pub fn outlet_flows(input: &FlowTestInput) -> Vec<OutletFlowResult> {
    input
        .measurements()
        .map(|(hydrant_index, outlet_index, m)| OutletFlowResult {
            hydrant_index,
            outlet_index,
            measurement: *m,
            flow_gpm: outlet_flow_gpm(m),
        })
        .collect()
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::measurement::Coefficient;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn zero_pitot_always_zero(d in 0.1_f64..1e300, c in 0.01_f64..=1.0) {
            let m = Measurement::new(d, Coefficient::Custom(c), 0.0);
            prop_assert_eq!(outlet_flow_gpm(&m), 0.0);
        }

        #[test]
        fn monotonic_in_pitot(
            d in 0.1_f64..12.0,
            c in 0.01_f64..=1.0,
            p in 0.0_f64..200.0,
            dp in 0.01_f64..50.0,
        ) {
            let lo = outlet_flow_gpm(&Measurement::new(d, Coefficient::Custom(c), p));
            let hi = outlet_flow_gpm(&Measurement::new(d, Coefficient::Custom(c), p + dp));
            prop_assert!(hi > lo);
        }

        #[test]
        fn monotonic_in_coefficient(
            d in 0.1_f64..12.0,
            c in 0.01_f64..0.9,
            dc in 0.01_f64..0.1,
            p in 0.1_f64..200.0,
        ) {
            let lo = outlet_flow_gpm(&Measurement::new(d, Coefficient::Custom(c), p));
            let hi = outlet_flow_gpm(&Measurement::new(d, Coefficient::Custom(c + dc), p));
            prop_assert!(hi > lo);
        }

        #[test]
        fn monotonic_in_diameter(
            d in 0.1_f64..12.0,
            dd in 0.01_f64..2.0,
            c in 0.01_f64..=1.0,
            p in 0.1_f64..200.0,
        ) {
            let lo = outlet_flow_gpm(&Measurement::new(d, Coefficient::Custom(c), p));
            let hi = outlet_flow_gpm(&Measurement::new(d + dd, Coefficient::Custom(c), p));
            prop_assert!(hi > lo);
        }
    }
}
