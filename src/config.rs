use serde::{Deserialize, Deserializer};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::artifact::{normalize_artifact_type, DEFAULT_ARTIFACT_TYPE};
use crate::error::{Result, VersionError};

/// File name looked up in the working directory
pub const LOCAL_CONFIG_FILE: &str = "semver.toml";
/// File name looked up in the user config directory
pub const USER_CONFIG_FILE: &str = ".semver.toml";
/// Properties file used when no custom path is configured
pub const DEFAULT_PROPERTIES_PATH: &str = "gradle.properties";

/// Represents the complete configuration for build-semver.
///
/// Controls where the version properties live and how the version string is
/// assembled (artifact type suffix, release tag, CI build number).
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct VersionConfig {
    /// `None` defers to the `remote-build` key of the properties file
    #[serde(default)]
    pub remote_build: Option<bool>,

    #[serde(default)]
    pub include_release_tag: bool,

    #[serde(default)]
    pub include_build_number: bool,

    #[serde(default)]
    pub ci_build_number_env_var_name: Option<String>,

    #[serde(
        default = "default_artifact_type",
        deserialize_with = "deserialize_artifact_type"
    )]
    artifact_type: String,

    #[serde(default = "default_properties_path")]
    pub custom_version_properties_path: PathBuf,
}

fn default_artifact_type() -> String {
    DEFAULT_ARTIFACT_TYPE.to_string()
}

fn default_properties_path() -> PathBuf {
    PathBuf::from(DEFAULT_PROPERTIES_PATH)
}

fn deserialize_artifact_type<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(normalize_artifact_type(&raw))
}

impl Default for VersionConfig {
    fn default() -> Self {
        VersionConfig {
            remote_build: None,
            include_release_tag: false,
            include_build_number: false,
            ci_build_number_env_var_name: None,
            artifact_type: default_artifact_type(),
            custom_version_properties_path: default_properties_path(),
        }
    }
}

impl VersionConfig {
    /// Configured artifact type, always uppercase. Empty means "use the
    /// value from the properties file".
    pub fn artifact_type(&self) -> &str {
        &self.artifact_type
    }

    /// Set the artifact type; the value is uppercased on assignment.
    pub fn set_artifact_type(&mut self, artifact_type: &str) {
        self.artifact_type = normalize_artifact_type(artifact_type);
    }

    /// Builder-style variant of [`VersionConfig::set_artifact_type`]
    pub fn with_artifact_type(mut self, artifact_type: &str) -> Self {
        self.set_artifact_type(artifact_type);
        self
    }

    /// Build number variable name, if set and non-empty
    pub fn build_number_var(&self) -> Option<&str> {
        self.ci_build_number_env_var_name
            .as_deref()
            .filter(|name| !name.is_empty())
    }

    pub fn properties_path(&self) -> &Path {
        &self.custom_version_properties_path
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `semver.toml` in current directory
/// 3. `.semver.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(VersionConfig)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>) -> Result<VersionConfig> {
    let path = if let Some(path) = config_path {
        path.to_path_buf()
    } else if Path::new(LOCAL_CONFIG_FILE).exists() {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else if let Some(config_dir) = dirs::config_dir() {
        let user_path = config_dir.join(USER_CONFIG_FILE);
        if user_path.exists() {
            user_path
        } else {
            return Ok(VersionConfig::default());
        }
    } else {
        return Ok(VersionConfig::default());
    };

    let config_str = fs::read_to_string(&path).map_err(|e| VersionError::io(&path, e))?;
    toml::from_str(&config_str)
        .map_err(|e| VersionError::config(format!("{}: {}", path.display(), e)))
}

/// Parse configuration from TOML text
pub fn parse_config(config_str: &str) -> Result<VersionConfig> {
    toml::from_str(config_str).map_err(|e| VersionError::config(e.to_string()))
}
