// Capability Probe - is hardware-accelerated compression usable on this host?
//
// Every check runs regardless of earlier failures; failures are recorded in
// the snapshot and logged, never raised.


use std::sync::Arc;
use tracing::{info, warn};

use crate::application::constants::VERSION_FLAG;
use crate::application::status_parser::parse_status_report;
use crate::config::QzipConfig;
use crate::domain::{ArgumentVector, ProbeFailure, ServiceSnapshot, SmokeTestOutcome};
use crate::port::{CommandRunner, EnvProvider, ScratchSpace};

/// Probe switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeOptions {
    /// Run the compress/decompress round trip (slow: writes a large file)
    pub smoke_test: bool,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self { smoke_test: true }
    }
}

pub struct CapabilityProbe {
    env: Arc<dyn EnvProvider>,
    runner: Arc<dyn CommandRunner>,
    scratch: Option<Arc<dyn ScratchSpace>>,
    config: QzipConfig,
    options: ProbeOptions,
}

impl CapabilityProbe {
    pub fn new(env: Arc<dyn EnvProvider>, runner: Arc<dyn CommandRunner>, config: QzipConfig) -> Self {
        Self {
            env,
            runner,
            scratch: None,
            config,
            options: ProbeOptions::default(),
        }
    }

    pub fn with_scratch(mut self, scratch: Arc<dyn ScratchSpace>) -> Self {
        self.scratch = Some(scratch);
        self
    }

    pub fn with_options(mut self, options: ProbeOptions) -> Self {
        self.options = options;
        self
    }

    /// Run every check and return the verdict with the snapshot behind it
    pub fn probe(&self) -> (bool, ServiceSnapshot) {
        let mut snapshot = ServiceSnapshot::default();

        let icp_root = self.root_var(&self.config.icp_root_var, &mut snapshot);
        let qz_root = self.root_var(&self.config.qz_root_var, &mut snapshot);
        snapshot.icp_root = icp_root;
        snapshot.qz_root = qz_root;

        self.check_devices(&mut snapshot);

        let qzip_available = self.tool_available(&self.config.qzip_program, &mut snapshot);
        let tar_available = self.tool_available(&self.config.tar_program, &mut snapshot);
        snapshot.qzip_available = qzip_available;
        snapshot.tar_available = tar_available;

        if self.options.smoke_test {
            self.smoke_test(&mut snapshot);
        }

        let verdict = snapshot.icp_root.is_some()
            && snapshot.qz_root.is_some()
            && !snapshot.devices.is_empty()
            && snapshot.hardware_available()
            && snapshot.qzip_available
            && snapshot.tar_available
            && (!self.options.smoke_test || snapshot.smoke_test == SmokeTestOutcome::Passed);

        info!(
            available = verdict,
            devices = snapshot.devices.len(),
            devices_up = snapshot.up_device_count(),
            failures = snapshot.failures.len(),
            "Capability probe finished"
        );
        (verdict, snapshot)
    }

    fn root_var(&self, key: &str, snapshot: &mut ServiceSnapshot) -> Option<String> {
        let value = self.env.non_empty(key);
        if value.is_none() {
            record(snapshot, ProbeFailure::MissingEnv { key: key.to_string() });
        }
        value
    }

    fn check_devices(&self, snapshot: &mut ServiceSnapshot) {
        let Some((program, rest)) = self.config.status_command.split_first() else {
            record(
                snapshot,
                ProbeFailure::StatusCommandFailed {
                    reason: "status command is empty".to_string(),
                },
            );
            return;
        };

        let args = ArgumentVector::from(rest.to_vec());
        match self.runner.run(program, &args) {
            Ok(output) => {
                snapshot.devices = parse_status_report(&output.combined);
                if snapshot.devices.is_empty() {
                    record(snapshot, ProbeFailure::NoDevicesFound);
                } else if !snapshot.hardware_available() {
                    record(snapshot, ProbeFailure::NoDeviceUp);
                }
            }
            Err(e) => record(
                snapshot,
                ProbeFailure::StatusCommandFailed {
                    reason: e.to_string(),
                },
            ),
        }
    }

    fn tool_available(&self, program: &str, snapshot: &mut ServiceSnapshot) -> bool {
        let args = ArgumentVector::from(vec![VERSION_FLAG.to_string()]);
        match self.runner.run(program, &args) {
            Ok(_) => true,
            Err(e) => {
                record(
                    snapshot,
                    ProbeFailure::ToolUnavailable {
                        tool: program.to_string(),
                        reason: e.to_string(),
                    },
                );
                false
            }
        }
    }

    fn smoke_test(&self, snapshot: &mut ServiceSnapshot) {
        let result = match (&self.scratch, snapshot.qzip_available) {
            (_, false) => Err(ProbeFailure::SmokeTestFailed {
                stage: "setup".to_string(),
                reason: format!("{} is not available", self.config.qzip_program),
            }),
            (None, true) => Err(ProbeFailure::SmokeTestFailed {
                stage: "setup".to_string(),
                reason: "no scratch space configured".to_string(),
            }),
            (Some(scratch), true) => smoke_test::run_smoke_test(
                self.runner.as_ref(),
                scratch.as_ref(),
                &self.config.qzip_program,
                self.config.smoke_test_bytes,
            ),
        };

        snapshot.smoke_test = match result {
            Ok(()) => SmokeTestOutcome::Passed,
            Err(failure) => {
                record(snapshot, failure);
                SmokeTestOutcome::Failed
            }
        };
    }
}

fn record(snapshot: &mut ServiceSnapshot, failure: ProbeFailure) {
    warn!(failure = %failure, "Capability check failed");
    snapshot.failures.push(failure);
}
