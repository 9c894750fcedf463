//! Error types for flow test evaluation.

use std::fmt;

use hf_core::Real;
use hf_core::numeric::ensure_finite;
use thiserror::Error;

/// One offending input field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldIssue {
    /// Dotted path to the field, e.g. `flow_hydrants[1].outlets[0].pitot_psi`.
    pub field: String,
    /// The rejected value as entered.
    pub value: String,
    pub reason: String,
}

impl FieldIssue {
    pub fn new(
        field: impl Into<String>,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} ({})", self.field, self.value, self.reason)
    }
}

/// Structurally invalid input. Always carries every offending field, never
/// only the first one found.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid flow test input ({} issue(s)): {}", .issues.len(), join_issues(.issues))]
pub struct ValidationError {
    pub issues: Vec<FieldIssue>,
}

impl ValidationError {
    /// Whether any issue names exactly this field.
    pub fn has_field(&self, field: &str) -> bool {
        self.issues.iter().any(|issue| issue.field == field)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.issues.iter().map(|issue| issue.field.as_str())
    }
}

fn join_issues(issues: &[FieldIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A mathematically undefined operation on otherwise valid input.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculationError {
    #[error(
        "Static pressure {static_psi} psi is at or below the {reference_psi} psi reference residual; \
         available fire flow is undefined"
    )]
    StaticAtOrBelowReference { static_psi: Real, reference_psi: Real },

    #[error(
        "Projection to {target_psi} psi is undefined for static {static_psi} psi and residual {residual_psi} psi"
    )]
    UndefinedProjection {
        static_psi: Real,
        residual_psi: Real,
        target_psi: Real,
    },

    #[error("Non-finite result for {what}: {value}")]
    NonFinite { what: &'static str, value: Real },
}

/// Ensure an intermediate value is finite, returning CalculationError if not.
pub(crate) fn check_finite(value: Real, what: &'static str) -> Result<Real, CalculationError> {
    ensure_finite(value, what).map_err(|_| CalculationError::NonFinite { what, value })
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

pub type EngineResult<T> = Result<T, EngineError>;
