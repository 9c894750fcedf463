//! Content-based fingerprints for flow tests.

use sha2::{Digest, Sha256};

use crate::schema::FlowTestDef;

/// SHA-256 over the canonical JSON of the test readings and the settings
/// used, so identical inputs always map to the same identifier.
pub fn compute_fingerprint(test: &FlowTestDef, options: &hf_engine::EvaluateOptions) -> String {
    let mut hasher = Sha256::new();

    let test_json = serde_json::to_string(test).unwrap_or_default();
    hasher.update(test_json.as_bytes());

    hasher.update(options.distance_unit.symbol().as_bytes());
    hasher.update(options.curve_samples.get().to_le_bytes());

    let result = hasher.finalize();
    format!("{:x}", result)
}
