// Compression Service - qzip jobs against files and directories

pub mod execute;
pub mod presets;

pub use execute::JobOutcome;

use crate::config::QzipConfig;
use crate::domain::JobSpec;
use crate::error::Result;
use crate::port::{CommandRunner, IdProvider};
use std::sync::Arc;

/// Runs [`JobSpec`]s through qzip
pub struct CompressionService {
    runner: Arc<dyn CommandRunner>,
    id_provider: Arc<dyn IdProvider>,
    qzip_program: String,
}

impl CompressionService {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        id_provider: Arc<dyn IdProvider>,
        config: &QzipConfig,
    ) -> Self {
        Self {
            runner,
            id_provider,
            qzip_program: config.qzip_program.clone(),
        }
    }

    /// Validate, preflight and run one job
    pub fn run(&self, spec: &JobSpec) -> Result<JobOutcome> {
        execute::execute(
            self.runner.as_ref(),
            self.id_provider.as_ref(),
            &self.qzip_program,
            spec,
        )
    }
}
