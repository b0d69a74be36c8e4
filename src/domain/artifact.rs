//! Artifact type classification
//!
//! Artifact types are free-form strings; the known set only drives an
//! informational warning.

/// Artifact types the tool expects to see
pub const KNOWN_ARTIFACT_TYPES: [&str; 7] = [
    "LOCAL",
    "SNAPSHOT",
    "CANARY",
    "ALPHA",
    "BETA",
    "RELEASE",
    "EXPERIMENTAL",
];

/// Artifact type used when nothing is configured
pub const DEFAULT_ARTIFACT_TYPE: &str = "LOCAL";

const RELEASE: &str = "RELEASE";

/// Case-insensitive match against the known set.
pub fn is_known_artifact_type(artifact_type: &str) -> bool {
    KNOWN_ARTIFACT_TYPES
        .iter()
        .any(|known| known.eq_ignore_ascii_case(artifact_type))
}

pub fn is_release(artifact_type: &str) -> bool {
    artifact_type.eq_ignore_ascii_case(RELEASE)
}

/// Normalize a configured artifact type
pub fn normalize_artifact_type(artifact_type: &str) -> String {
    artifact_type.to_uppercase()
}
