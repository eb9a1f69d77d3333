// qzipctl Infrastructure - System Adapters
// Implements: CommandRunner, EnvProvider, WorkingDirectory, ScratchSpace

pub mod process_env;
pub mod scratch;
pub mod subprocess_executor;

pub use process_env::{ProcessEnv, ProcessWorkingDirectory};
pub use scratch::FsScratchSpace;
pub use subprocess_executor::SubprocessExecutor;
