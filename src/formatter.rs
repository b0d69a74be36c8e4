//! Version string assembly.
//!
//! Pure: the output depends only on the record, the configuration and the
//! single environment variable named by the configuration. Problems are
//! reported as [VersionWarning]s and never stop formatting.

use crate::config::VersionConfig;
use crate::domain::{is_known_artifact_type, is_release, VersionRecord};
use crate::env::EnvSource;
use crate::warning::VersionWarning;

/// CI variables known to carry a build number
pub const KNOWN_CI_BUILD_NUMBER_VARS: [&str; 2] = ["BUILD_RUN_NUMBER", "BITBUCKET_BUILD_NUMBER"];

/// Result of formatting a version
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedVersion {
    /// Full version string
    pub version: String,
    /// Artifact type the version was built with (may be empty)
    pub artifact_type: String,
    /// Non-fatal issues found along the way, in the order they occurred
    pub warnings: Vec<VersionWarning>,
}

/// Artifact type to use: the configured one, else the one from the store.
pub fn effective_artifact_type<'a>(
    record: &'a VersionRecord,
    config: &'a VersionConfig,
) -> &'a str {
    if config.artifact_type().is_empty() {
        record.artifact_type.as_str()
    } else {
        config.artifact_type()
    }
}

/// Build the version string for `record` under `config`.
///
/// Local builds produce `major.minor.patch[-TYPE]`, where a `RELEASE` type is
/// left off unless `include_release_tag` is set. Remote builds add the CI
/// build number (`major.minor.patch.BUILD[-TYPE]`) when one is available; a
/// remote build without a build number variable name is formatted as a local
/// build.
pub fn format_version<E: EnvSource + ?Sized>(
    record: &VersionRecord,
    config: &VersionConfig,
    env: &E,
) -> FormattedVersion {
    let mut warnings = Vec::new();
    let artifact_type = effective_artifact_type(record, config);

    let version = if config.remote_build == Some(true) {
        match config.build_number_var() {
            Some(var_name) => {
                format_remote(record, config, artifact_type, var_name, env, &mut warnings)
            }
            None => {
                warnings.push(VersionWarning::MissingBuildNumberVariable);
                format_local(record, config, artifact_type, &mut warnings)
            }
        }
    } else {
        format_local(record, config, artifact_type, &mut warnings)
    };

    FormattedVersion {
        version,
        artifact_type: artifact_type.to_string(),
        warnings,
    }
}

fn format_local(
    record: &VersionRecord,
    config: &VersionConfig,
    artifact_type: &str,
    warnings: &mut Vec<VersionWarning>,
) -> String {
    let base = record.base_version();
    check_artifact_type(artifact_type, warnings);

    if is_release(artifact_type) && !config.include_release_tag {
        return base;
    }
    with_suffix(base, artifact_type)
}

fn format_remote<E: EnvSource + ?Sized>(
    record: &VersionRecord,
    config: &VersionConfig,
    artifact_type: &str,
    var_name: &str,
    env: &E,
    warnings: &mut Vec<VersionWarning>,
) -> String {
    let base = record.base_version();

    if !KNOWN_CI_BUILD_NUMBER_VARS
        .iter()
        .any(|known| known.eq_ignore_ascii_case(var_name))
    {
        warnings.push(VersionWarning::UnrecognizedCiVariable {
            name: var_name.to_string(),
        });
    }
    let build_number = env.var(var_name).filter(|value| !value.is_empty());

    check_artifact_type(artifact_type, warnings);

    if is_release(artifact_type) {
        let tag = config.include_release_tag;
        let build = config.include_build_number;
        if !tag && !build {
            return base;
        } else if tag && !build {
            return with_suffix(base, artifact_type);
        } else if !tag {
            match &build_number {
                Some(number) => return format!("{}.{}", base, number),
                None => warnings.push(VersionWarning::BuildNumberUnset {
                    name: var_name.to_string(),
                }),
            }
        }
        // tag && build: same shape as any other artifact type
    }

    match build_number {
        Some(number) => with_suffix(format!("{}.{}", base, number), artifact_type),
        None => {
            warnings.push(VersionWarning::BuildNumberUnset {
                name: var_name.to_string(),
            });
            with_suffix(base, artifact_type)
        }
    }
}

fn check_artifact_type(artifact_type: &str, warnings: &mut Vec<VersionWarning>) {
    if !artifact_type.is_empty() && !is_known_artifact_type(artifact_type) {
        warnings.push(VersionWarning::UnknownArtifactType {
            artifact_type: artifact_type.to_string(),
        });
    }
}

fn with_suffix(version: String, artifact_type: &str) -> String {
    if artifact_type.is_empty() {
        version
    } else {
        format!("{}-{}", version, artifact_type)
    }
}
