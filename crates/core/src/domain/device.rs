// Accelerator device records parsed from the service status report

use serde::Serialize;

/// Reported state of one accelerator device
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceState {
    Up,
    Down,
    Unknown,
}

impl DeviceState {
    /// Map the raw `state:` token; anything other than up/down is Unknown
    pub fn from_report(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "up" => DeviceState::Up,
            "down" => DeviceState::Down,
            _ => DeviceState::Unknown,
        }
    }
}

impl std::fmt::Display for DeviceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DeviceState::Up => write!(f, "up"),
            DeviceState::Down => write!(f, "down"),
            DeviceState::Unknown => write!(f, "unknown"),
        }
    }
}

/// One hardware acceleration unit as listed in the status report
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub name: String,
    pub device_type: String,
    pub state: DeviceState,
}

impl DeviceRecord {
    pub fn new(name: impl Into<String>, device_type: impl Into<String>, state: DeviceState) -> Self {
        Self {
            name: name.into(),
            device_type: device_type.into(),
            state,
        }
    }

    pub fn is_up(&self) -> bool {
        self.state == DeviceState::Up
    }
}

impl std::fmt::Display for DeviceRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Name: {} HwType: {} State: {}",
            self.name, self.device_type, self.state
        )
    }
}
