use std::fmt;

use crate::domain::VersionField;

/// Non-fatal issues raised while computing or bumping a version.
/// These never abort an operation; they are reported to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionWarning {
    /// Artifact type is outside the known set
    UnknownArtifactType { artifact_type: String },
    /// Remote build requested without naming the build number variable
    MissingBuildNumberVariable,
    /// Build number variable name is not one of the recognized CI variables
    UnrecognizedCiVariable { name: String },
    /// Build number variable is absent or empty in the environment
    BuildNumberUnset { name: String },
    /// Decrement refused because the field is already zero
    DecrementBelowZero { field: VersionField },
    /// Increment refused because the field is already at its maximum
    IncrementOverflow { field: VersionField },
    /// `remote-build` property could not be read as a boolean
    InvalidRemoteBuildFlag { value: String },
}

impl fmt::Display for VersionWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionWarning::UnknownArtifactType { artifact_type } => {
                write!(
                    f,
                    "Artifact type '{}' is not one of the expected types; it will be used as given",
                    artifact_type
                )
            }
            VersionWarning::MissingBuildNumberVariable => {
                write!(
                    f,
                    "No build number variable configured; set ci_build_number_env_var_name. \
                     Version will not include a build number"
                )
            }
            VersionWarning::UnrecognizedCiVariable { name } => {
                write!(
                    f,
                    "Unknown build number variable '{}'; this may have unexpected results",
                    name
                )
            }
            VersionWarning::BuildNumberUnset { name } => {
                write!(
                    f,
                    "Build number variable '{}' is not set; version will not include a build number",
                    name
                )
            }
            VersionWarning::DecrementBelowZero { field } => {
                write!(
                    f,
                    "Cannot decrement {} below 0; no changes made to the version",
                    field
                )
            }
            VersionWarning::IncrementOverflow { field } => {
                write!(
                    f,
                    "Cannot increment {} past {}; no changes made to the version",
                    field,
                    u32::MAX
                )
            }
            VersionWarning::InvalidRemoteBuildFlag { value } => {
                write!(
                    f,
                    "Cannot parse remote-build value '{}'; defaulting to a local build",
                    value
                )
            }
        }
    }
}
