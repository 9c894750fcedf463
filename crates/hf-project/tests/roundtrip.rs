use hf_project::schema::*;
use hf_project::{load_document, save_document};

fn document() -> FlowTestDocument {
    FlowTestDocument {
        version: 1,
        test: FlowTestDef {
            test_hydrant: HydrantDef {
                id: "H-100".to_string(),
                lat: Some(40.0),
                lon: Some(-75.0),
            },
            static_psi: 65.0,
            residual_psi: 45.5,
            flow_hydrants: vec![FlowHydrantDef {
                id: "H-101".to_string(),
                lat: Some(40.001),
                lon: Some(-75.001),
                outlets: vec![
                    OutletDef {
                        diameter_in: 2.5,
                        pitot_psi: 28.0,
                        coefficient: Some(CoefficientDef::Preset("smooth".to_string())),
                    },
                    OutletDef {
                        diameter_in: 4.5,
                        pitot_psi: 15.0,
                        coefficient: Some(CoefficientDef::Value(0.8)),
                    },
                    OutletDef {
                        diameter_in: 2.5,
                        pitot_psi: 22.0,
                        coefficient: None,
                    },
                ],
            }],
            metadata: MetadataDef {
                tester: Some("Crew 7".to_string()),
                temperature_c: Some(-3.0),
                ..Default::default()
            },
        },
        options: Some(OptionsDef {
            distance_unit: Some(hf_core::DistanceUnit::Meters),
            curve_samples: std::num::NonZeroUsize::new(12),
        }),
    }
}

#[test]
fn roundtrip_yaml() {
    let doc = document();
    let path = std::env::temp_dir().join("hf_project_roundtrip.yaml");

    save_document(&path, &doc).unwrap();
    let loaded = load_document(&path).unwrap();

    assert_eq!(doc, loaded);
}

#[test]
fn roundtrip_json() {
    let doc = document();
    let path = std::env::temp_dir().join("hf_project_roundtrip.json");

    save_document(&path, &doc).unwrap();
    let loaded = load_document(&path).unwrap();

    assert_eq!(doc, loaded);
}
