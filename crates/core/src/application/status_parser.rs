// Accelerator service status report parser
//
// Report lines look like:
//   qat_dev0 - type: 4xxx,  inst_id: 0,  node_id: 0,  bsf: 0000:76:00.0,  #accel: 1 #engines: 9 state: up

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::domain::{DeviceRecord, DeviceState};

static DEVICE_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\S+) - type:\s*([^,\s]+),.*\bstate:\s*([^,\s]+)")
        .expect("device line pattern is valid")
});

/// Extract one record per device line, in report order.
///
/// Lines that do not describe a device are skipped. An empty result is not
/// an error here; the probe decides what zero devices means.
pub fn parse_status_report(text: &str) -> Vec<DeviceRecord> {
    text.lines()
        .filter_map(|line| DEVICE_LINE.captures(line))
        .map(|caps| {
            let record = DeviceRecord::new(
                &caps[1],
                &caps[2],
                DeviceState::from_report(&caps[3]),
            );
            debug!(
                device = %record.name,
                device_type = %record.device_type,
                state = %record.state,
                "Parsed accelerator device"
            );
            record
        })
        .collect()
}
