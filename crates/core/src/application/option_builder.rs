// qzip option builder
//
// qzip is order-sensitive for some flags; the emission order below is fixed.

use std::path::{Path, PathBuf};

use crate::application::constants::*;
use crate::domain::error::Result;
use crate::domain::{ArgumentVector, BuildError, JobSpec, Mode, PreflightError};

/// Translates a [`JobSpec`] into qzip arguments
#[derive(Debug, Default)]
pub struct OptionBuilder {
    args: ArgumentVector,
}

impl OptionBuilder {
    /// Build the argument vector for `spec`
    ///
    /// Emission order: `-d`, `-k`, `-R`, `-P busy`, `-A`, `-O`, `-L`, `-o`,
    /// `-r`, then the inputs as given.
    ///
    /// # Errors
    /// - BuildError::NoInputs if `spec.inputs` is empty
    /// - BuildError::HeaderAlgorithmMismatch if the header cannot be written
    ///   by the chosen algorithm; nothing is emitted in that case
    /// - BuildError::NonUtf8Path if an input or output path is not UTF-8
    pub fn build(spec: &JobSpec) -> Result<ArgumentVector> {
        if spec.inputs.is_empty() {
            return Err(BuildError::NoInputs);
        }
        if !spec.header.is_compatible_with(spec.algorithm) {
            return Err(BuildError::HeaderAlgorithmMismatch {
                header: spec.header,
                algorithm: spec.algorithm,
            });
        }

        let mut builder = Self::default();
        builder.decompression(spec);
        builder.keep_source(spec);
        builder.recursive(spec);
        builder.busy_poll(spec);
        builder.algorithm(spec);
        builder.header(spec);
        builder.level(spec);
        builder.output(spec)?;
        builder.concurrency(spec);
        for input in &spec.inputs {
            builder.args.push_path(input)?;
        }
        Ok(builder.args)
    }

    fn decompression(&mut self, spec: &JobSpec) {
        if spec.mode == Mode::Decompress {
            self.args.push(QZIP_DECOMPRESS);
        }
    }

    fn keep_source(&mut self, spec: &JobSpec) {
        if spec.keep_source {
            self.args.push(QZIP_KEEP_SOURCE);
        }
    }

    // Recursion only makes sense for directory inputs
    fn recursive(&mut self, spec: &JobSpec) {
        if spec.directory && spec.recursive {
            self.args.push(QZIP_RECURSIVE);
        }
    }

    fn busy_poll(&mut self, spec: &JobSpec) {
        if spec.busy_poll {
            self.args.push_pair(QZIP_BUSY_POLL, QZIP_BUSY_POLL_VALUE);
        }
    }

    fn algorithm(&mut self, spec: &JobSpec) {
        if let Some(value) = spec.algorithm.flag_value() {
            self.args.push_pair(QZIP_ALGORITHM, value);
        }
    }

    // Compatibility is checked up front in build()
    fn header(&mut self, spec: &JobSpec) {
        if let Some(value) = spec.header.flag_value() {
            self.args.push_pair(QZIP_HEADER, value);
        }
    }

    fn level(&mut self, spec: &JobSpec) {
        let level = spec.effective_level();
        if spec.is_compress() && !level.is_default() {
            self.args.push_pair(QZIP_LEVEL, level.to_string());
        }
    }

    // Directory jobs write next to each input file
    fn output(&mut self, spec: &JobSpec) -> Result<()> {
        if spec.directory {
            return Ok(());
        }
        if let Some(output) = spec.output.as_deref().filter(|p| !p.as_os_str().is_empty()) {
            self.args.push(QZIP_OUTPUT);
            self.args.push_path(output)?;
        }
        Ok(())
    }

    fn concurrency(&mut self, spec: &JobSpec) {
        if spec.concurrency > 0 {
            self.args.push_pair(QZIP_CONCURRENCY, spec.concurrency.to_string());
        }
    }
}

/// Every input must exist before qzip is spawned
///
/// # Errors
/// - PreflightError::InputNotFound for the first missing input
pub fn preflight_job(spec: &JobSpec) -> std::result::Result<(), PreflightError> {
    first_missing(&spec.inputs).map_or(Ok(()), |missing| {
        Err(PreflightError::InputNotFound(missing.to_path_buf()))
    })
}

pub(crate) fn first_missing(paths: &[PathBuf]) -> Option<&Path> {
    paths.iter().find(|p| !p.exists()).map(PathBuf::as_path)
}
