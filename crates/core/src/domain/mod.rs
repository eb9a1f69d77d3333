// Domain Layer - Job descriptions, device records and capability snapshot

pub mod archive;
pub mod argv;
pub mod device;
pub mod error;
pub mod job_spec;
pub mod snapshot;

// Re-exports
pub use archive::{has_archive_extension, ArchiveJob, ArchiveMode, ARCHIVE_EXTENSIONS};
pub use argv::ArgumentVector;
pub use device::{DeviceRecord, DeviceState};
pub use error::{BuildError, PreflightError};
pub use job_spec::{Algorithm, CompressionLevel, HeaderFormat, JobSpec, Mode};
pub use snapshot::{ProbeFailure, ServiceSnapshot, SmokeTestOutcome};
