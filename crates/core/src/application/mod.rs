// Application Layer - Probe, job and archive use cases

pub mod archive_builder;
pub mod archive_runner;
pub mod compression;
pub mod constants;
pub mod option_builder;
pub mod probe;
pub mod status_parser;

// Re-exports
pub use archive_builder::{preflight_archive, ArchiveCommandBuilder};
pub use archive_runner::{
    normalize_archive_job, resolve_archive_job, ArchiveRunner, NormalizedArchive, WorkdirGuard};
pub use compression::{presets, CompressionService, JobOutcome};
pub use option_builder::{preflight_job, OptionBuilder};
pub use probe::{CapabilityProbe, ProbeOptions};
pub use status_parser::parse_status_report;
