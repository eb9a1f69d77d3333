// Capability snapshot produced by one probe run

use serde::Serialize;
use thiserror::Error;

use super::device::DeviceRecord;

/// A single capability check that did not pass.
///
/// Never aborts the probe; collected into [`ServiceSnapshot::failures`].
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ProbeFailure {
    #[error("Environment variable {key} is missing or empty")]
    MissingEnv { key: String },

    #[error("Status command failed: {reason}")]
    StatusCommandFailed { reason: String },

    #[error("No accelerator devices found in status report")]
    NoDevicesFound,

    #[error("No accelerator device reports state up")]
    NoDeviceUp,

    #[error("{tool} is not available: {reason}")]
    ToolUnavailable { tool: String, reason: String },

    #[error("Smoke test failed during {stage}: {reason}")]
    SmokeTestFailed { stage: String, reason: String },
}

/// Result of the optional compress/decompress round trip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmokeTestOutcome {
    Skipped,
    Passed,
    Failed,
}

/// Best-effort view of the host's compression capability.
///
/// Every field keeps its default (absent, empty, false) when the matching
/// check failed, so a partial snapshot is still informative.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceSnapshot {
    pub icp_root: Option<String>,
    pub qz_root: Option<String>,
    pub devices: Vec<DeviceRecord>,
    pub qzip_available: bool,
    pub tar_available: bool,
    pub smoke_test: SmokeTestOutcome,
    pub failures: Vec<ProbeFailure>,
}

impl Default for ServiceSnapshot {
    fn default() -> Self {
        Self {
            icp_root: None,
            qz_root: None,
            devices: Vec::new(),
            qzip_available: false,
            tar_available: false,
            smoke_test: SmokeTestOutcome::Skipped,
            failures: Vec::new(),
        }
    }
}

impl ServiceSnapshot {
    /// At least one device is up
    pub fn hardware_available(&self) -> bool {
        self.devices.iter().any(DeviceRecord::is_up)
    }

    pub fn up_device_count(&self) -> usize {
        self.devices.iter().filter(|d| d.is_up()).count()
    }
}

impl std::fmt::Display for ServiceSnapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let missing = "<unset>";
        writeln!(f, "ICP_ROOT:\n\t{}", self.icp_root.as_deref().unwrap_or(missing))?;
        writeln!(f, "QZ_ROOT:\n\t{}", self.qz_root.as_deref().unwrap_or(missing))?;
        writeln!(f, "TarIsAvailable:\n\t{}", self.tar_available)?;
        writeln!(f, "QzipIsAvailable:\n\t{}", self.qzip_available)?;
        writeln!(f, "HWs:")?;
        for device in &self.devices {
            writeln!(f, "\t{}", device)?;
        }
        if !self.failures.is_empty() {
            writeln!(f, "Failures:")?;
            for failure in &self.failures {
                writeln!(f, "\t{}", failure)?;
            }
        }
        Ok(())
    }
}
