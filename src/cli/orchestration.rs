//! Version operation workflows
//!
//! Each operation is one read-modify-write cycle against the properties
//! file: load, optionally bump one field, format, optionally persist. The
//! functions here take configuration and environment as parameters and
//! return warnings as values, so they can be driven without clap.

use std::borrow::Cow;

use tracing::{debug, error, info};

use crate::config::VersionConfig;
use crate::domain::{BumpDirection, VersionField, VersionRecord};
use crate::env::EnvSource;
use crate::error::{Result, VersionError};
use crate::formatter::format_version;
use crate::store::VersionStore;
use crate::warning::VersionWarning;

/// A single version operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Step one field and persist the result
    Bump {
        field: VersionField,
        direction: BumpDirection,
    },
    /// Compute the version without touching the file
    Print,
}

impl Operation {
    pub fn increment(field: VersionField) -> Self {
        Operation::Bump {
            field,
            direction: BumpDirection::Increment,
        }
    }

    pub fn decrement(field: VersionField) -> Self {
        Operation::Bump {
            field,
            direction: BumpDirection::Decrement,
        }
    }

    /// Task-style name, e.g. `incrementMajorVersion`
    pub fn task_name(&self) -> &'static str {
        use BumpDirection::*;
        use VersionField::*;
        match self {
            Operation::Bump {
                field: Major,
                direction: Increment,
            } => "incrementMajorVersion",
            Operation::Bump {
                field: Minor,
                direction: Increment,
            } => "incrementMinorVersion",
            Operation::Bump {
                field: Patch,
                direction: Increment,
            } => "incrementPatchVersion",
            Operation::Bump {
                field: Major,
                direction: Decrement,
            } => "decrementMajorVersion",
            Operation::Bump {
                field: Minor,
                direction: Decrement,
            } => "decrementMinorVersion",
            Operation::Bump {
                field: Patch,
                direction: Decrement,
            } => "decrementPatchVersion",
            Operation::Print => "printVersion",
        }
    }
}

/// Result of a successful operation
#[derive(Debug, Clone, PartialEq)]
pub struct OperationOutcome {
    /// The formatted version
    pub version: String,

    /// Version numbers after the operation
    pub record: VersionRecord,

    /// Non-fatal issues, in the order they occurred
    pub warnings: Vec<VersionWarning>,

    /// Whether the properties file was written
    pub persisted: bool,
}

/// Result of the initialize flow
#[derive(Debug)]
pub enum ApplyOutcome {
    /// Store read, version computed and written back
    Applied(OperationOutcome),

    /// Store unavailable; version computed from configuration only
    Degraded {
        version: String,
        warnings: Vec<VersionWarning>,
        error: VersionError,
    },

    /// Store readable but its contents are unusable
    Failed(VersionError),
}

impl ApplyOutcome {
    /// The version to expose, if one could be computed
    pub fn version(&self) -> Option<&str> {
        match self {
            ApplyOutcome::Applied(outcome) => Some(&outcome.version),
            ApplyOutcome::Degraded { version, .. } => Some(version),
            ApplyOutcome::Failed(_) => None,
        }
    }
}

/// Run one operation against the configured properties file.
///
/// # Returns
/// * `Ok(OperationOutcome)` - Version computed (and persisted for bumps)
/// * `Err(NotFound | Io)` - File missing, unreadable or unwritable; nothing persisted
/// * `Err(Parse)` - A version field is missing or not a number
pub fn run_operation<E: EnvSource + ?Sized>(
    operation: Operation,
    config: &VersionConfig,
    env: &E,
) -> Result<OperationOutcome> {
    debug!(
        "Running {} against {}",
        operation.task_name(),
        config.properties_path().display()
    );

    let mut store = VersionStore::load(config.properties_path())?;
    let mut record = store.record()?;
    let mut warnings = Vec::new();

    if let Operation::Bump { field, direction } = operation {
        let before = record.get(field);
        match record.bump(field, direction) {
            Some(warning) => warnings.push(warning),
            None => info!("{}: {} -> {}", field, before, record.get(field)),
        }
    }

    let config = resolve_remote_build(config, &store, &mut warnings);
    let formatted = format_version(&record, &config, env);
    warnings.extend(formatted.warnings);

    let persisted = match operation {
        Operation::Print => false,
        Operation::Bump { .. } => {
            store.apply_record(&record);
            if !config.artifact_type().is_empty() {
                store.set_artifact_type(&formatted.artifact_type);
            }
            store.persist()?;
            true
        }
    };

    Ok(OperationOutcome {
        version: formatted.version,
        record,
        warnings,
        persisted,
    })
}

pub fn increment_major<E: EnvSource + ?Sized>(
    config: &VersionConfig,
    env: &E,
) -> Result<OperationOutcome> {
    run_operation(Operation::increment(VersionField::Major), config, env)
}

pub fn increment_minor<E: EnvSource + ?Sized>(
    config: &VersionConfig,
    env: &E,
) -> Result<OperationOutcome> {
    run_operation(Operation::increment(VersionField::Minor), config, env)
}

pub fn increment_patch<E: EnvSource + ?Sized>(
    config: &VersionConfig,
    env: &E,
) -> Result<OperationOutcome> {
    run_operation(Operation::increment(VersionField::Patch), config, env)
}

pub fn decrement_major<E: EnvSource + ?Sized>(
    config: &VersionConfig,
    env: &E,
) -> Result<OperationOutcome> {
    run_operation(Operation::decrement(VersionField::Major), config, env)
}

pub fn decrement_minor<E: EnvSource + ?Sized>(
    config: &VersionConfig,
    env: &E,
) -> Result<OperationOutcome> {
    run_operation(Operation::decrement(VersionField::Minor), config, env)
}

pub fn decrement_patch<E: EnvSource + ?Sized>(
    config: &VersionConfig,
    env: &E,
) -> Result<OperationOutcome> {
    run_operation(Operation::decrement(VersionField::Patch), config, env)
}

pub fn print_version<E: EnvSource + ?Sized>(
    config: &VersionConfig,
    env: &E,
) -> Result<OperationOutcome> {
    run_operation(Operation::Print, config, env)
}

/// Initialize flow: compute the project version and write the resolved
/// artifact type back to the store.
///
/// I/O problems do not abort: the error is logged and a local-style version
/// is computed without persisting. If the store could not be read the
/// numbers are `0.0.0`; if only the write failed the loaded numbers are kept.
pub fn apply_version<E: EnvSource + ?Sized>(config: &VersionConfig, env: &E) -> ApplyOutcome {
    let mut store = match VersionStore::load(config.properties_path()) {
        Ok(store) => store,
        Err(e) => return degrade(VersionRecord::default(), config, env, e),
    };
    let record = match store.record() {
        Ok(record) => record,
        Err(e) => {
            error!("Cannot compute version: {}", e);
            return ApplyOutcome::Failed(e);
        }
    };

    let mut warnings = Vec::new();
    let effective = resolve_remote_build(config, &store, &mut warnings);
    let formatted = format_version(&record, &effective, env);
    warnings.extend(formatted.warnings);

    if !effective.artifact_type().is_empty() {
        store.set_artifact_type(&formatted.artifact_type);
    }
    if let Err(e) = store.persist() {
        return degrade(record, config, env, e);
    }

    info!("Project version: {}", formatted.version);
    ApplyOutcome::Applied(OperationOutcome {
        version: formatted.version,
        record,
        warnings,
        persisted: true,
    })
}

fn degrade<E: EnvSource + ?Sized>(
    record: VersionRecord,
    config: &VersionConfig,
    env: &E,
    err: VersionError,
) -> ApplyOutcome {
    if !err.is_io() {
        error!("Cannot compute version: {}", err);
        return ApplyOutcome::Failed(err);
    }
    error!("{}; falling back to configuration-only version", err);

    let mut local = config.clone();
    local.remote_build = Some(false);
    let formatted = format_version(&record, &local, env);
    ApplyOutcome::Degraded {
        version: formatted.version,
        warnings: formatted.warnings,
        error: err,
    }
}

/// Fill in `remote_build` from the store when the configuration leaves it open.
fn resolve_remote_build<'a>(
    config: &'a VersionConfig,
    store: &VersionStore,
    warnings: &mut Vec<VersionWarning>,
) -> Cow<'a, VersionConfig> {
    if config.remote_build.is_some() {
        return Cow::Borrowed(config);
    }

    let mut resolved = config.clone();
    resolved.remote_build = match store.remote_build_flag() {
        Some((flag, warning)) => {
            warnings.extend(warning);
            Some(flag)
        }
        None => Some(false),
    };
    Cow::Owned(resolved)
}
