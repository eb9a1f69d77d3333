// Port Layer - Interfaces for external dependencies

pub mod command_runner;
pub mod env_provider;
pub mod id_provider; // For deterministic testing
pub mod scratch_space;
pub mod time_provider;
pub mod working_dir;

// Re-exports
pub use command_runner::{CommandRunner, ExecError, ExecOutput};
pub use env_provider::EnvProvider;
pub use id_provider::IdProvider;
pub use scratch_space::ScratchSpace;
pub use time_provider::TimeProvider;
pub use working_dir::WorkingDirectory;
