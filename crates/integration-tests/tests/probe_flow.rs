//! Capability probe against stand-in status and qzip scripts

#![cfg(unix)]

mod common;

use std::path::Path;
use std::sync::Arc;

use qzipctl_core::application::{CapabilityProbe, ProbeOptions};
use qzipctl_core::domain::{DeviceState, ProbeFailure, SmokeTestOutcome};
use qzipctl_core::port::env_provider::mocks::MockEnvProvider;
use qzipctl_core::port::id_provider::mocks::SequentialIdProvider;
use qzipctl_core::port::time_provider::SystemTimeProvider;
use qzipctl_core::QzipConfig;
use qzipctl_infra_system::{FsScratchSpace, SubprocessExecutor};

const REPORT: &str = "\
Checking status of all devices.
There is 2 QAT acceleration device(s) in the system:
 qat_dev0 - type: 4xxx,  inst_id: 0,  node_id: 0,  bsf: 0000:6b:00.0,  #accel: 1 #engines: 9 state: up
 qat_dev1 - type: 4xxx,  inst_id: 1,  node_id: 1,  bsf: 0000:e8:00.0,  #accel: 1 #engines: 9 state: down
";

fn env() -> Arc<MockEnvProvider> {
    Arc::new(
        MockEnvProvider::new()
            .with("ICP_ROOT", "/opt/intel/QAT")
            .with("QZ_ROOT", "/opt/QATzip"),
    )
}

fn config(dir: &Path, qzip: &str) -> QzipConfig {
    std::fs::write(dir.join("report.txt"), REPORT).unwrap();
    QzipConfig {
        qzip_program: qzip.to_string(),
        status_command: vec![
            "cat".to_string(),
            dir.join("report.txt").display().to_string(),
        ],
        scratch_dir: dir.join("scratch"),
        smoke_test_bytes: 64 * 1024,
        ..QzipConfig::default()
    }
}

fn executor() -> Arc<SubprocessExecutor> {
    Arc::new(SubprocessExecutor::new(Arc::new(SystemTimeProvider)))
}

#[test]
fn test_probe_with_smoke_test_cleans_scratch() {
    let _serial = common::serial();
    let tmp = tempfile::tempdir().unwrap();
    let qzip = common::write_script(tmp.path(), "qzip", "exit 0");
    let config = config(tmp.path(), &qzip.display().to_string());
    std::fs::create_dir_all(&config.scratch_dir).unwrap();
    let scratch = Arc::new(FsScratchSpace::new(
        config.scratch_dir.clone(),
        Arc::new(SequentialIdProvider::default()),
    ));
    let scratch_dir = config.scratch_dir.clone();

    let (available, snapshot) = CapabilityProbe::new(env(), executor(), config)
        .with_scratch(scratch)
        .probe();

    assert!(available, "{:?}", snapshot.failures);
    assert_eq!(snapshot.smoke_test, SmokeTestOutcome::Passed);
    assert_eq!(snapshot.devices.len(), 2);
    assert_eq!(snapshot.devices[1].state, DeviceState::Down);
    assert_eq!(std::fs::read_dir(&scratch_dir).unwrap().count(), 0);
}

#[test]
fn test_missing_qzip_reported() {
    let _serial = common::serial();
    let tmp = tempfile::tempdir().unwrap();
    let config = config(tmp.path(), "/nonexistent/bin/qzip");

    let (available, snapshot) = CapabilityProbe::new(env(), executor(), config)
        .with_options(ProbeOptions { smoke_test: false })
        .probe();

    assert!(!available);
    assert!(!snapshot.qzip_available);
    assert!(snapshot.tar_available);
    assert!(matches!(
        snapshot.failures.as_slice(),
        [ProbeFailure::ToolUnavailable { tool, .. }] if tool == "/nonexistent/bin/qzip"
    ));
}

#[test]
fn test_failing_status_command() {
    let _serial = common::serial();
    let tmp = tempfile::tempdir().unwrap();
    let config = QzipConfig {
        status_command: vec!["false".to_string()],
        ..config(tmp.path(), "true")
    };

    let (available, snapshot) = CapabilityProbe::new(env(), executor(), config)
        .with_options(ProbeOptions { smoke_test: false })
        .probe();

    assert!(!available);
    assert!(snapshot.devices.is_empty());
    assert!(snapshot.qzip_available);
    assert!(matches!(
        snapshot.failures.as_slice(),
        [ProbeFailure::StatusCommandFailed { .. }]
    ));
}
