//! Property tests over the whole evaluation pipeline.

use hf_engine::{
    CalculationError, Coefficient, EngineError, EvaluateOptions, FlowHydrant, FlowTestInput,
    Measurement, TestHydrant, TestMetadata, evaluate, outlet_flow_gpm,
};
use proptest::prelude::*;

fn measurement() -> impl Strategy<Value = Measurement> {
    (
        prop::sample::select(vec![1.5_f64, 2.5, 4.0, 4.5, 5.0, 6.0]),
        prop::sample::select(vec![
            Coefficient::Smooth,
            Coefficient::SquareSharp,
            Coefficient::SquareProjecting,
            Coefficient::Custom(0.85),
        ]),
        0.0_f64..120.0,
    )
        .prop_map(|(d, c, p)| Measurement::new(d, c, p))
}

/// Split `outlets` into `groups` non-empty flow hydrants, preserving order.
fn group(outlets: &[Measurement], groups: usize) -> Vec<FlowHydrant> {
    let base = outlets.len() / groups;
    let extra = outlets.len() % groups;
    let mut rest = outlets;
    (0..groups)
        .map(|i| {
            let (chunk, tail) = rest.split_at(base + usize::from(i < extra));
            rest = tail;
            FlowHydrant {
                id: format!("F{}", i + 1),
                location: None,
                outlets: chunk.to_vec(),
            }
        })
        .collect()
}

fn input(static_psi: f64, residual_psi: f64, flow_hydrants: Vec<FlowHydrant>) -> FlowTestInput {
    FlowTestInput {
        test_hydrant: TestHydrant {
            id: "T".to_string(),
            location: None,
        },
        static_psi,
        residual_psi,
        flow_hydrants,
        metadata: TestMetadata::default(),
    }
}

proptest! {
    #[test]
    fn total_independent_of_hydrant_grouping(
        outlets in prop::collection::vec(measurement(), 3..9),
        static_psi in 40.0_f64..150.0,
        drop_fraction in 0.05_f64..0.9,
    ) {
        let residual_psi = static_psi * (1.0 - drop_fraction);
        let expected: f64 = outlets.iter().map(outlet_flow_gpm).sum();
        let options = EvaluateOptions::default();

        for groups in 1..=3 {
            let hydrants = group(&outlets, groups);
            prop_assert_eq!(hydrants.len(), groups);
            let result = evaluate(&input(static_psi, residual_psi, hydrants), &options).unwrap();
            prop_assert_eq!(result.total_flow_gpm, expected);
        }
    }

    #[test]
    fn total_independent_of_outlet_order(
        mut outlets in prop::collection::vec(measurement(), 1..9),
        static_psi in 40.0_f64..150.0,
    ) {
        let residual_psi = static_psi / 2.0;
        let options = EvaluateOptions::default();
        let forward_input = input(static_psi, residual_psi, group(&outlets, 1));
        let forward = evaluate(&forward_input, &options).unwrap();
        outlets.reverse();
        let backward_input = input(static_psi, residual_psi, group(&outlets, 1));
        let backward = evaluate(&backward_input, &options).unwrap();
        let scale = forward.total_flow_gpm.max(1.0);
        prop_assert!((forward.total_flow_gpm - backward.total_flow_gpm).abs() <= 1e-9 * scale);
        prop_assert_eq!(forward.class, backward.class);
    }

    #[test]
    fn low_static_always_calculation_error(
        outlets in prop::collection::vec(measurement(), 1..4),
        static_psi in 0.5_f64..=20.0,
        residual_fraction in 0.0_f64..0.99,
    ) {
        let residual_psi = static_psi * residual_fraction;
        let test = input(static_psi, residual_psi, group(&outlets, 1));
        let result = evaluate(&test, &EvaluateOptions::default());
        prop_assert!(
            matches!(
                result,
                Err(EngineError::Calculation(CalculationError::StaticAtOrBelowReference { .. }))
            ),
            "got {:?}",
            result
        );
    }

    #[test]
    fn residual_at_or_above_static_always_validation_error(
        outlets in prop::collection::vec(measurement(), 1..4),
        static_psi in 0.5_f64..200.0,
        excess in 0.0_f64..50.0,
    ) {
        let residual_psi = static_psi + excess;
        let test = input(static_psi, residual_psi, group(&outlets, 1));
        match evaluate(&test, &EvaluateOptions::default()) {
            Err(EngineError::Validation(err)) => prop_assert!(err.has_field("residual_psi")),
            other => prop_assert!(false, "expected validation error, got {:?}", other),
        }
    }
}
