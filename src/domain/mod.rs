//! Domain logic - version numbers and artifact types, independent of storage

pub mod artifact;
pub mod version;

pub use artifact::{is_known_artifact_type, is_release, normalize_artifact_type};
pub use version::{BumpDirection, VersionField, VersionRecord};
