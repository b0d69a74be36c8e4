use std::fs;
use std::path::PathBuf;

use build_semver::cli::{
    apply_version, decrement_major, decrement_minor, decrement_patch, increment_major,
    increment_minor, increment_patch, print_version, ApplyOutcome, OperationOutcome,
};
use build_semver::config::VersionConfig;
use build_semver::domain::{VersionField, VersionRecord};
use build_semver::env::{MapEnv, ProcessEnv};
use build_semver::warning::VersionWarning;
use build_semver::VersionError;
use serial_test::serial;
use tempfile::TempDir;

type Op = fn(&VersionConfig, &MapEnv) -> build_semver::Result<OperationOutcome>;

const STANDARD_STORE: &str = "major=1\nminor=2\npatch=3\nartifact-type=LOCAL\n";

fn setup(contents: &str) -> (TempDir, PathBuf) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gradle.properties");
    fs::write(&path, contents).unwrap();
    (dir, path)
}

fn config_for(path: &PathBuf, artifact_type: &str) -> VersionConfig {
    let mut config = VersionConfig::default().with_artifact_type(artifact_type);
    config.custom_version_properties_path = path.clone();
    config
}

// ============================================================================
// Bump operations
// ============================================================================

#[test]
fn test_increment_major_then_print() {
    let (_dir, path) = setup(STANDARD_STORE);
    let config = config_for(&path, "SNAPSHOT");

    let bumped = increment_major(&config, &MapEnv::new()).unwrap();
    assert_eq!(bumped.version, "2.2.3-SNAPSHOT");
    assert!(bumped.persisted);

    let printed = print_version(&config, &MapEnv::new()).unwrap();
    assert_eq!(printed.version, "2.2.3-SNAPSHOT");
    assert!(!printed.persisted);
}

#[test]
fn test_each_increment_touches_one_field() {
    let ops: [(Op, VersionRecord); 3] = [
        (increment_major, VersionRecord::new(2, 2, 3, "LOCAL")),
        (increment_minor, VersionRecord::new(1, 3, 3, "LOCAL")),
        (increment_patch, VersionRecord::new(1, 2, 4, "LOCAL")),
    ];
    for (op, expected) in ops {
        let (_dir, path) = setup(STANDARD_STORE);
        let outcome = op(&config_for(&path, "LOCAL"), &MapEnv::new()).unwrap();
        assert_eq!(outcome.record, expected);
    }
}

#[test]
fn test_each_decrement_touches_one_field() {
    let ops: [(Op, &str); 3] = [
        (decrement_major, "0.2.3"),
        (decrement_minor, "1.1.3"),
        (decrement_patch, "1.2.2"),
    ];
    for (op, expected) in ops {
        let (_dir, path) = setup(STANDARD_STORE);
        let outcome = op(&config_for(&path, "RELEASE"), &MapEnv::new()).unwrap();
        assert_eq!(outcome.version, expected);
        assert!(outcome.warnings.is_empty());
    }
}

#[test]
fn test_decrement_major_at_zero_keeps_store() {
    let (_dir, path) = setup("major=0\nminor=4\npatch=1\nartifact-type=LOCAL\n");
    let config = config_for(&path, "LOCAL");

    let outcome = decrement_major(&config, &MapEnv::new()).unwrap();
    assert_eq!(outcome.record.major, 0);
    assert_eq!(
        outcome.warnings,
        vec![VersionWarning::DecrementBelowZero {
            field: VersionField::Major
        }]
    );
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "major=0\nminor=4\npatch=1\nartifact-type=LOCAL\n"
    );
}

#[test]
fn test_decrement_patch_at_zero_leaves_version_unchanged() {
    let (_dir, path) = setup("major=1\nminor=2\npatch=0\n");
    let config = config_for(&path, "SNAPSHOT");

    let before = print_version(&config, &MapEnv::new()).unwrap();
    let after = decrement_patch(&config, &MapEnv::new()).unwrap();
    assert_eq!(before.version, "1.2.0-SNAPSHOT");
    assert_eq!(after.version, before.version);
    assert_eq!(after.record.patch, 0);
    assert!(after
        .warnings
        .contains(&VersionWarning::DecrementBelowZero {
            field: VersionField::Patch
        }));
}

#[test]
fn test_decrement_from_one_reaches_zero() {
    let (_dir, path) = setup("major=1\nminor=0\npatch=0\n");
    let outcome = decrement_major(&config_for(&path, "RELEASE"), &MapEnv::new()).unwrap();
    assert_eq!(outcome.version, "0.0.0");
    assert!(outcome.warnings.is_empty());
}

#[test]
fn test_bump_preserves_unrelated_lines() {
    let (_dir, path) = setup(
        "# Project settings\norg.gradle.jvmargs=-Xmx2048m\n\nmajor=1\nminor=2\npatch=3\nartifact-type=LOCAL\nkotlin.code.style=official\n",
    );
    increment_patch(&config_for(&path, "LOCAL"), &MapEnv::new()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# Project settings\norg.gradle.jvmargs=-Xmx2048m\n\nmajor=1\nminor=2\npatch=4\nartifact-type=LOCAL\nkotlin.code.style=official\n"
    );
}

#[test]
fn test_bump_writes_configured_artifact_type() {
    let (_dir, path) = setup("major=1\nminor=2\npatch=3\nartifact-type=LOCAL\n");
    increment_minor(&config_for(&path, "beta"), &MapEnv::new()).unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "major=1\nminor=3\npatch=3\nartifact-type=BETA\n"
    );
}

#[test]
fn test_print_never_writes() {
    let contents = "major=1\nminor=2\npatch=3\nartifact-type=LOCAL\n";
    let (_dir, path) = setup(contents);
    print_version(&config_for(&path, "CANARY"), &MapEnv::new()).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}

#[test]
fn test_empty_config_artifact_type_uses_store() {
    let (_dir, path) = setup("major=3\nminor=0\npatch=1\nartifact-type=ALPHA\n");
    let outcome = print_version(&config_for(&path, ""), &MapEnv::new()).unwrap();
    assert_eq!(outcome.version, "3.0.1-ALPHA");
}

#[test]
fn test_increment_at_max_warns_and_keeps_store() {
    let contents = format!("major=1\nminor=2\npatch={}\n", u32::MAX);
    let (_dir, path) = setup(&contents);
    let outcome = increment_patch(&config_for(&path, "RELEASE"), &MapEnv::new()).unwrap();

    assert_eq!(outcome.version, format!("1.2.{}", u32::MAX));
    assert_eq!(
        outcome.warnings,
        vec![VersionWarning::IncrementOverflow {
            field: VersionField::Patch
        }]
    );
    assert!(fs::read_to_string(&path)
        .unwrap()
        .starts_with(&contents));
}

// ============================================================================
// Error paths
// ============================================================================

#[test]
fn test_missing_store_is_not_found() {
    let dir = TempDir::new().unwrap();
    let config = config_for(&dir.path().join("gradle.properties"), "LOCAL");
    let err = increment_patch(&config, &MapEnv::new()).unwrap_err();
    assert!(matches!(err, VersionError::NotFound { .. }));
    assert!(err.is_io());
}

#[test]
fn test_non_numeric_field_aborts_without_writing() {
    let contents = "major=1\nminor=two\npatch=3\n";
    let (_dir, path) = setup(contents);
    let err = increment_major(&config_for(&path, "LOCAL"), &MapEnv::new()).unwrap_err();
    assert!(matches!(err, VersionError::Parse { .. }));
    assert!(!err.is_io());
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}

// ============================================================================
// Remote builds
// ============================================================================

#[test]
fn test_remote_build_with_build_number() {
    let (_dir, path) = setup(STANDARD_STORE);
    let mut config = config_for(&path, "SNAPSHOT");
    config.remote_build = Some(true);
    config.ci_build_number_env_var_name = Some("BUILD_NUM".to_string());

    let env = MapEnv::new().with("BUILD_NUM", "42");
    let outcome = print_version(&config, &env).unwrap();
    assert_eq!(outcome.version, "1.2.3.42-SNAPSHOT");
}

#[test]
fn test_remote_build_flag_read_from_store() {
    let (_dir, path) = setup("major=1\nminor=2\npatch=3\nremote-build=true\n");
    let mut config = config_for(&path, "SNAPSHOT");
    config.ci_build_number_env_var_name = Some("BUILD_RUN_NUMBER".to_string());

    let env = MapEnv::new().with("BUILD_RUN_NUMBER", "5");
    assert_eq!(print_version(&config, &env).unwrap().version, "1.2.3.5-SNAPSHOT");

    config.remote_build = Some(false);
    assert_eq!(print_version(&config, &env).unwrap().version, "1.2.3-SNAPSHOT");
}

#[test]
fn test_unparsable_remote_build_flag_warns() {
    let (_dir, path) = setup("major=1\nminor=2\npatch=3\nremote-build=sometimes\n");
    let outcome = print_version(&config_for(&path, "SNAPSHOT"), &MapEnv::new()).unwrap();
    assert_eq!(outcome.version, "1.2.3-SNAPSHOT");
    assert_eq!(
        outcome.warnings,
        vec![VersionWarning::InvalidRemoteBuildFlag {
            value: "sometimes".to_string()
        }]
    );
}

#[test]
#[serial]
fn test_remote_build_reads_process_environment() {
    let (_dir, path) = setup(STANDARD_STORE);
    let mut config = config_for(&path, "CANARY");
    config.remote_build = Some(true);
    config.ci_build_number_env_var_name = Some("BUILD_RUN_NUMBER".to_string());

    std::env::set_var("BUILD_RUN_NUMBER", "314");
    let with_number = print_version(&config, &ProcessEnv).unwrap();
    std::env::remove_var("BUILD_RUN_NUMBER");
    let without_number = print_version(&config, &ProcessEnv).unwrap();

    assert_eq!(with_number.version, "1.2.3.314-CANARY");
    assert_eq!(without_number.version, "1.2.3-CANARY");
    assert_eq!(
        without_number.warnings,
        vec![VersionWarning::BuildNumberUnset {
            name: "BUILD_RUN_NUMBER".to_string()
        }]
    );
}

// ============================================================================
// Apply flow
// ============================================================================

#[test]
fn test_apply_syncs_artifact_type() {
    let (_dir, path) = setup("major=1\nminor=2\npatch=3\nartifact-type=LOCAL\n");
    let outcome = apply_version(&config_for(&path, "release"), &MapEnv::new());
    assert_eq!(outcome.version(), Some("1.2.3"));
    assert!(matches!(outcome, ApplyOutcome::Applied(_)));
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "major=1\nminor=2\npatch=3\nartifact-type=RELEASE\n"
    );
}

#[test]
fn test_apply_adds_missing_artifact_type() {
    let (_dir, path) = setup("major=0\nminor=1\npatch=0\n");
    apply_version(&config_for(&path, "SNAPSHOT"), &MapEnv::new());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "major=0\nminor=1\npatch=0\nartifact-type=SNAPSHOT\n"
    );
}

#[test]
fn test_apply_degrades_when_store_missing() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gradle.properties");
    let mut config = config_for(&path, "SNAPSHOT");
    config.remote_build = Some(true);
    config.ci_build_number_env_var_name = Some("BUILD_RUN_NUMBER".to_string());

    let env = MapEnv::new().with("BUILD_RUN_NUMBER", "8");
    match apply_version(&config, &env) {
        ApplyOutcome::Degraded { version, error, .. } => {
            assert_eq!(version, "0.0.0-SNAPSHOT");
            assert!(matches!(error, VersionError::NotFound { .. }));
        }
        other => panic!("expected degraded outcome, got {:?}", other),
    }
    assert!(!path.exists());
}

#[test]
fn test_apply_fails_on_bad_numbers() {
    let (_dir, path) = setup("major=x\nminor=0\npatch=0\n");
    let outcome = apply_version(&config_for(&path, "LOCAL"), &MapEnv::new());
    assert!(matches!(
        outcome,
        ApplyOutcome::Failed(VersionError::Parse { .. })
    ));
    assert_eq!(outcome.version(), None);
}

#[cfg(unix)]
#[test]
fn test_apply_degrades_when_store_not_writable() {
    use std::os::unix::fs::PermissionsExt;

    let contents = "major=4\nminor=5\npatch=6\nartifact-type=LOCAL\n";
    let (dir, path) = setup(contents);
    let config = config_for(&path, "SNAPSHOT");

    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o555)).unwrap();
    // privileged users can still write into a read-only directory
    let writable = fs::write(dir.path().join("write-check"), "").is_ok();
    let outcome = apply_version(&config, &MapEnv::new());
    fs::set_permissions(dir.path(), fs::Permissions::from_mode(0o755)).unwrap();
    if writable {
        return;
    }

    match outcome {
        ApplyOutcome::Degraded { version, error, .. } => {
            assert_eq!(version, "4.5.6-SNAPSHOT");
            assert!(matches!(error, VersionError::Io { .. }));
        }
        other => panic!("expected degraded outcome, got {:?}", other),
    }
    assert_eq!(fs::read_to_string(&path).unwrap(), contents);
}
