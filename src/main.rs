use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

use build_semver::cli::{
    apply_version, run_operation, ApplyOutcome, Operation, EXIT_FAILED, EXIT_IO_DEGRADED, EXIT_OK,
};
use build_semver::config::{self, VersionConfig};
use build_semver::domain::VersionField;
use build_semver::env::ProcessEnv;
use build_semver::{logging, ui};

#[derive(Parser)]
#[command(
    name = "build-semver",
    version,
    about = "Bump and print a project version kept in a properties file"
)]
struct Args {
    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Version properties file path")]
    properties: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Artifact type suffix, e.g. SNAPSHOT")]
    artifact_type: Option<String>,

    #[arg(long, global = true, help = "Treat this run as a CI build")]
    remote_build: bool,

    #[arg(long, global = true, help = "Keep the RELEASE suffix on release builds")]
    include_release_tag: bool,

    #[arg(long, global = true, help = "Add the CI build number to release builds")]
    include_build_number: bool,

    #[arg(long, global = true, help = "Environment variable holding the CI build number")]
    build_number_var: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Clone, Copy)]
enum Command {
    /// Increment the major version
    IncrementMajor,
    /// Increment the minor version
    IncrementMinor,
    /// Increment the patch version
    IncrementPatch,
    /// Decrement the major version (never below 0)
    DecrementMajor,
    /// Decrement the minor version (never below 0)
    DecrementMinor,
    /// Decrement the patch version (never below 0)
    DecrementPatch,
    /// Print the current version
    PrintVersion,
    /// Compute the project version and sync the artifact type to the file
    Apply,
}

impl Command {
    fn operation(self) -> Option<Operation> {
        match self {
            Command::IncrementMajor => Some(Operation::increment(VersionField::Major)),
            Command::IncrementMinor => Some(Operation::increment(VersionField::Minor)),
            Command::IncrementPatch => Some(Operation::increment(VersionField::Patch)),
            Command::DecrementMajor => Some(Operation::decrement(VersionField::Major)),
            Command::DecrementMinor => Some(Operation::decrement(VersionField::Minor)),
            Command::DecrementPatch => Some(Operation::decrement(VersionField::Patch)),
            Command::PrintVersion => Some(Operation::Print),
            Command::Apply => None,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(e) = logging::init(args.verbose) {
        ui::display_error(&e.to_string());
    }

    let config = match build_config(&args) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            std::process::exit(EXIT_FAILED);
        }
    };
    debug!("Effective configuration: {:?}", config);

    let code = match args.command.operation() {
        Some(operation) => run_task(operation, &config),
        None => run_apply(&config),
    };
    std::process::exit(code);
}

/// Load the configuration file and layer command line overrides on top
fn build_config(args: &Args) -> Result<VersionConfig> {
    let mut config =
        config::load_config(args.config.as_deref()).context("Error loading config")?;

    if let Some(path) = &args.properties {
        config.custom_version_properties_path = path.clone();
    }
    if let Some(artifact_type) = &args.artifact_type {
        config.set_artifact_type(artifact_type);
    }
    if args.remote_build {
        config.remote_build = Some(true);
    }
    if args.include_release_tag {
        config.include_release_tag = true;
    }
    if args.include_build_number {
        config.include_build_number = true;
    }
    if let Some(name) = &args.build_number_var {
        config.ci_build_number_env_var_name = Some(name.clone());
    }
    Ok(config)
}

fn run_task(operation: Operation, config: &VersionConfig) -> i32 {
    match run_operation(operation, config, &ProcessEnv) {
        Ok(outcome) => {
            ui::display_warnings(&outcome.warnings);
            if outcome.persisted {
                ui::display_success(&format!(
                    "Updated {}",
                    config.properties_path().display()
                ));
            }
            ui::display_version(&outcome.version);
            EXIT_OK
        }
        Err(e) if e.is_io() => {
            ui::display_error(&format!("{}: {}", operation.task_name(), e));
            EXIT_IO_DEGRADED
        }
        Err(e) => {
            ui::display_error(&format!("{}: {}", operation.task_name(), e));
            EXIT_FAILED
        }
    }
}

fn run_apply(config: &VersionConfig) -> i32 {
    match apply_version(config, &ProcessEnv) {
        ApplyOutcome::Applied(outcome) => {
            ui::display_warnings(&outcome.warnings);
            ui::display_version(&outcome.version);
            EXIT_OK
        }
        ApplyOutcome::Degraded {
            version, warnings, ..
        } => {
            ui::display_warnings(&warnings);
            ui::display_status(&format!("Using fallback version {}", version));
            ui::display_version(&version);
            EXIT_IO_DEGRADED
        }
        // already logged by apply_version
        ApplyOutcome::Failed(_) => EXIT_FAILED,
    }
}
