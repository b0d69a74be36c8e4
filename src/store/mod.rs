//! Version properties store
//!
//! Reads and writes the key/value file that holds `major`, `minor`, `patch`
//! and `artifact-type`. Every other line in the file is passed through.
//!
//! There is no file locking: two processes bumping the same file at once can
//! lose an update. Writes go through a temp file and a rename, so a reader
//! never sees a truncated file.

pub mod properties;

pub use properties::Properties;

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::debug;

use crate::domain::{VersionField, VersionRecord};
use crate::error::{Result, VersionError};
use crate::warning::VersionWarning;

pub const ARTIFACT_TYPE_KEY: &str = "artifact-type";
pub const REMOTE_BUILD_KEY: &str = "remote-build";

/// Properties file bound to the path it was loaded from
#[derive(Debug, Clone)]
pub struct VersionStore {
    path: PathBuf,
    properties: Properties,
}

impl VersionStore {
    /// Load the store at `path`.
    ///
    /// # Returns
    /// * `Err(NotFound)` - If the file does not exist
    /// * `Err(Io)` - If the file exists but cannot be read
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => VersionError::NotFound {
                path: path.to_path_buf(),
            },
            _ => VersionError::io(path, e),
        })?;

        let properties = Properties::parse(&text);
        debug!(
            "Loaded {} entries from {}",
            properties.len(),
            path.display()
        );
        Ok(VersionStore {
            path: path.to_path_buf(),
            properties,
        })
    }

    /// Wrap already-parsed properties, e.g. for a file that is about to be created
    pub fn with_properties(path: impl Into<PathBuf>, properties: Properties) -> Self {
        VersionStore {
            path: path.into(),
            properties,
        }
    }

    /// Read the version numbers and artifact type.
    ///
    /// A missing `artifact-type` reads as the empty string.
    pub fn record(&self) -> Result<VersionRecord> {
        Ok(VersionRecord {
            major: self.read_number(VersionField::Major)?,
            minor: self.read_number(VersionField::Minor)?,
            patch: self.read_number(VersionField::Patch)?,
            artifact_type: self.artifact_type().unwrap_or_default().to_string(),
        })
    }

    fn read_number(&self, field: VersionField) -> Result<u32> {
        let key = field.key();
        let raw = self
            .properties
            .get(key)
            .ok_or_else(|| VersionError::parse(key, "<missing>"))?;
        raw.trim()
            .parse::<u32>()
            .map_err(|_| VersionError::parse(key, raw))
    }

    pub fn artifact_type(&self) -> Option<&str> {
        self.properties.get(ARTIFACT_TYPE_KEY)
    }

    pub fn set_artifact_type(&mut self, artifact_type: &str) {
        self.properties.set(ARTIFACT_TYPE_KEY, artifact_type);
    }

    /// Copy the numeric fields of `record` into the properties
    pub fn apply_record(&mut self, record: &VersionRecord) {
        for field in VersionField::ALL {
            self.properties.set(field.key(), record.get(field).to_string());
        }
    }

    /// `remote-build` flag from the file, if present and non-empty.
    ///
    /// Only `true` (any case) enables it; other values read as `false` and
    /// come back with a warning.
    pub fn remote_build_flag(&self) -> Option<(bool, Option<VersionWarning>)> {
        let raw = self.properties.get(REMOTE_BUILD_KEY)?.trim();
        if raw.is_empty() {
            return None;
        }
        if raw.eq_ignore_ascii_case("true") {
            Some((true, None))
        } else if raw.eq_ignore_ascii_case("false") {
            Some((false, None))
        } else {
            Some((
                false,
                Some(VersionWarning::InvalidRemoteBuildFlag {
                    value: raw.to_string(),
                }),
            ))
        }
    }

    /// Write the store back to its path, replacing the file atomically.
    ///
    /// A symlinked path is resolved first, so the link stays in place and its
    /// target is updated. The replacement keeps the permissions of the file it
    /// replaces. On failure the original file is left as it was.
    pub fn persist(&self) -> Result<()> {
        let target = match fs::canonicalize(&self.path) {
            Ok(real) => real,
            Err(e) if e.kind() == ErrorKind::NotFound => self.path.clone(),
            Err(e) => return Err(VersionError::io(&self.path, e)),
        };
        let dir = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };

        let mut temp = NamedTempFile::new_in(dir).map_err(|e| VersionError::io(dir, e))?;
        temp.write_all(self.properties.to_string().as_bytes())
            .map_err(|e| VersionError::io(temp.path(), e))?;

        match fs::metadata(&target) {
            Ok(meta) => temp
                .as_file()
                .set_permissions(meta.permissions())
                .map_err(|e| VersionError::io(temp.path(), e))?,
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(VersionError::io(&target, e)),
        }

        temp.as_file()
            .sync_all()
            .map_err(|e| VersionError::io(temp.path(), e))?;
        temp.persist(&target)
            .map_err(|e| VersionError::io(&target, e.error))?;

        debug!("Wrote {}", target.display());
        Ok(())
    }
}
