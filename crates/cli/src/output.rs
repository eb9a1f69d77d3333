//! Terminal rendering for probe snapshots and job results

use colored::Colorize;
use serde::Serialize;
use tabled::{Table, Tabled};

use qzipctl_core::domain::{DeviceRecord, ServiceSnapshot, SmokeTestOutcome};
use qzipctl_core::port::ExecOutput;

#[derive(Tabled)]
struct DeviceRow {
    device: String,
    #[tabled(rename = "type")]
    device_type: String,
    state: String,
}

impl From<&DeviceRecord> for DeviceRow {
    fn from(record: &DeviceRecord) -> Self {
        Self {
            device: record.name.clone(),
            device_type: record.device_type.clone(),
            state: record.state.to_string(),
        }
    }
}

#[derive(Serialize)]
struct ProbeReport<'a> {
    available: bool,
    #[serde(flatten)]
    snapshot: &'a ServiceSnapshot,
}

pub fn print_probe_json(available: bool, snapshot: &ServiceSnapshot) -> anyhow::Result<()> {
    let report = ProbeReport {
        available,
        snapshot,
    };
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

pub fn print_probe_table(available: bool, snapshot: &ServiceSnapshot) {
    println!("{}", "Compression Capability".cyan().bold());
    println!();
    println!("  {} {}", "ICP_ROOT:".bold(), root(snapshot.icp_root.as_deref()));
    println!("  {} {}", "QZ_ROOT:".bold(), root(snapshot.qz_root.as_deref()));
    println!("  {} {}", "qzip:".bold(), yes_no(snapshot.qzip_available));
    println!("  {} {}", "tar:".bold(), yes_no(snapshot.tar_available));
    println!(
        "  {} {}",
        "Smoke test:".bold(),
        match snapshot.smoke_test {
            SmokeTestOutcome::Passed => "passed".green(),
            SmokeTestOutcome::Failed => "failed".red(),
            SmokeTestOutcome::Skipped => "skipped".yellow(),
        }
    );
    println!();

    if snapshot.devices.is_empty() {
        println!("{}", "No accelerator devices found".yellow());
    } else {
        let rows: Vec<DeviceRow> = snapshot.devices.iter().map(DeviceRow::from).collect();
        println!("{}", Table::new(rows));
    }

    if !snapshot.failures.is_empty() {
        println!();
        for failure in &snapshot.failures {
            println!("  {} {}", "✗".red(), failure);
        }
    }

    println!();
    if available {
        println!("{}", "✓ Hardware compression is available".green().bold());
    } else {
        println!("{}", "✗ Hardware compression is NOT available".red().bold());
    }
}

pub fn print_success(message: &str, command: &str, output: &ExecOutput) {
    println!("{}", format!("✓ {}", message).green().bold());
    println!("  {} {}", "Command:".bold(), command);
    println!("  {} {} ms", "Duration:".bold(), output.duration_ms);
    let text = output.combined.trim_end();
    if !text.is_empty() {
        println!();
        println!("{}", text);
    }
}

fn root(value: Option<&str>) -> colored::ColoredString {
    value.map_or_else(|| "<unset>".red(), |v| v.normal())
}

fn yes_no(available: bool) -> colored::ColoredString {
    if available {
        "available".green()
    } else {
        "unavailable".red()
    }
}
