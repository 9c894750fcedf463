//! hf-project: flow test documents, evaluation entry points and reports.

pub mod convert;
pub mod hash;
pub mod report;
pub mod schema;

use std::path::Path;

use hf_engine::{
    CalculationError, EngineError, EvaluateOptions, FlowTestInput, FlowTestResult,
    ValidationError, evaluate, validate_input,
};
use rayon::prelude::*;

pub use hash::compute_fingerprint;
pub use report::{FlowTestReport, round_to, supply_curve_csv};
pub use schema::*;

/// Newest document version this crate reads and writes.
pub const LATEST_VERSION: u32 = 1;

pub type ProjectResult<T> = Result<T, ProjectError>;

#[derive(thiserror::Error, Debug)]
pub enum ProjectError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    #[error("Unsupported document version {version} (latest is {LATEST_VERSION})")]
    UnsupportedVersion { version: u32 },

    #[error("Unsupported file format: {path} (expected .yaml, .yml or .json)")]
    UnsupportedFormat { path: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<EngineError> for ProjectError {
    fn from(err: EngineError) -> Self {
        match err {
            EngineError::Validation(e) => Self::Validation(e),
            EngineError::Calculation(e) => Self::Calculation(e),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Yaml,
    Json,
}

fn format_of(path: &Path) -> ProjectResult<Format> {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
            Ok(Format::Yaml)
        }
        Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
        _ => Err(ProjectError::UnsupportedFormat {
            path: path.display().to_string(),
        }),
    }
}

fn check_version(doc: FlowTestDocument) -> ProjectResult<FlowTestDocument> {
    if doc.version == 0 || doc.version > LATEST_VERSION {
        return Err(ProjectError::UnsupportedVersion {
            version: doc.version,
        });
    }
    Ok(doc)
}

pub fn parse_yaml(content: &str) -> ProjectResult<FlowTestDocument> {
    check_version(serde_yaml::from_str(content)?)
}

pub fn parse_json(content: &str) -> ProjectResult<FlowTestDocument> {
    check_version(serde_json::from_str(content)?)
}

/// Load a document, choosing the format from the file extension.
///
/// Only the structure and version are checked here; see [`validate_document`].
pub fn load_document(path: &Path) -> ProjectResult<FlowTestDocument> {
    let format = format_of(path)?;
    let content = std::fs::read_to_string(path)?;
    match format {
        Format::Yaml => parse_yaml(&content),
        Format::Json => parse_json(&content),
    }
}

pub fn save_document(path: &Path, doc: &FlowTestDocument) -> ProjectResult<()> {
    let content = match format_of(path)? {
        Format::Yaml => serde_yaml::to_string(doc)?,
        Format::Json => serde_json::to_string_pretty(doc)?,
    };
    std::fs::write(path, content)?;
    Ok(())
}

/// Merge settings: command line first, then the document, then defaults.
pub fn resolve_options(document: Option<&OptionsDef>, overrides: &OptionsDef) -> EvaluateOptions {
    let defaults = EvaluateOptions::default();
    let document = document.copied().unwrap_or_default();
    EvaluateOptions {
        distance_unit: overrides
            .distance_unit
            .or(document.distance_unit)
            .unwrap_or(defaults.distance_unit),
        curve_samples: overrides
            .curve_samples
            .or(document.curve_samples)
            .unwrap_or(defaults.curve_samples),
    }
}

/// Convert and validate without evaluating.
pub fn validate_document(doc: &FlowTestDocument) -> ProjectResult<FlowTestInput> {
    let input = doc.test.to_input()?;
    validate_input(&input)?;
    Ok(input)
}

/// Engine result plus its rounded presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    pub options: EvaluateOptions,
    pub result: FlowTestResult,
    pub report: FlowTestReport,
}

pub fn evaluate_document(
    doc: &FlowTestDocument,
    overrides: &OptionsDef,
) -> ProjectResult<Evaluation> {
    let input = doc.test.to_input()?;
    let options = resolve_options(doc.options.as_ref(), overrides);
    let result = evaluate(&input, &options)?;
    let fingerprint = compute_fingerprint(&doc.test, &options);
    let report = FlowTestReport::from_result(&doc.test, &result, fingerprint);
    Ok(Evaluation {
        options,
        result,
        report,
    })
}

/// Evaluate many documents in parallel. Results keep input order and one
/// failure does not affect the others.
pub fn evaluate_batch(
    docs: &[FlowTestDocument],
    overrides: &OptionsDef,
) -> Vec<ProjectResult<Evaluation>> {
    docs.par_iter()
        .map(|doc| evaluate_document(doc, overrides))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hf_core::DistanceUnit;
    use std::num::NonZeroUsize;

    const SINGLE: &str = r#"
version: 1
test:
  test_hydrant: { id: H-001 }
  static_psi: 80
  residual_psi: 60
  flow_hydrants:
    - id: H-002
      outlets:
        - { diameter_in: 2.5, pitot_psi: 50, coefficient: smooth }
"#;

    #[test]
    fn parse_and_evaluate() {
        let doc = parse_yaml(SINGLE).unwrap();
        let eval = evaluate_document(&doc, &OptionsDef::default()).unwrap();
        assert_eq!(eval.report.nfpa_class, "AA");
        assert_eq!(eval.report.outlets[0].flow_gpm, 1186.0);
        assert_eq!(eval.report.outlets[0].outlet, 1);
        assert_eq!(eval.report.outlets[0].hydrant_id, "H-002");
        assert_eq!(eval.report.pressure_drop_psi, 20.0);
    }

    #[test]
    fn rejects_future_version() {
        let content = SINGLE.replace("version: 1", "version: 9");
        match parse_yaml(&content) {
            Err(ProjectError::UnsupportedVersion { version }) => assert_eq!(version, 9),
            other => panic!("expected version error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_extension() {
        let err = load_document(Path::new("flow_test.toml")).unwrap_err();
        assert!(matches!(err, ProjectError::UnsupportedFormat { .. }));
    }

    #[test]
    fn options_precedence() {
        let document = OptionsDef {
            distance_unit: Some(DistanceUnit::Meters),
            curve_samples: NonZeroUsize::new(5),
        };
        let overrides = OptionsDef {
            distance_unit: None,
            curve_samples: NonZeroUsize::new(8),
        };

        let resolved = resolve_options(Some(&document), &overrides);
        assert_eq!(resolved.distance_unit, DistanceUnit::Meters);
        assert_eq!(resolved.curve_samples.get(), 8);

        let defaults = resolve_options(None, &OptionsDef::default());
        assert_eq!(defaults, EvaluateOptions::default());
    }

    #[test]
    fn engine_errors_keep_their_kind() {
        let content = SINGLE
            .replace("static_psi: 80", "static_psi: 18")
            .replace("residual_psi: 60", "residual_psi: 10");
        let doc = parse_yaml(&content).unwrap();
        let err = evaluate_document(&doc, &OptionsDef::default()).unwrap_err();
        assert!(matches!(
            err,
            ProjectError::Calculation(CalculationError::StaticAtOrBelowReference { .. })
        ));

        let content = SINGLE.replace("residual_psi: 60", "residual_psi: 90");
        let doc = parse_yaml(&content).unwrap();
        match validate_document(&doc) {
            Err(ProjectError::Validation(e)) => assert!(e.has_field("residual_psi")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn batch_is_independent() {
        let good = parse_yaml(SINGLE).unwrap();
        let mut bad = good.clone();
        bad.test.flow_hydrants.clear();

        let results = evaluate_batch(&[good.clone(), bad, good], &OptionsDef::default());
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ProjectError::Validation(_))));
        assert_eq!(
            results[0].as_ref().unwrap().report,
            results[2].as_ref().unwrap().report
        );
    }
}
