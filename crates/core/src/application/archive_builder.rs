// tar command builder (qzip as the compression filter)

use crate::application::constants::*;
use crate::application::option_builder::first_missing;
use crate::domain::error::Result;
use crate::domain::{
    has_archive_extension, ArchiveJob, ArchiveMode, ArgumentVector, BuildError, PreflightError,
};

/// Translates an [`ArchiveJob`] into tar arguments
#[derive(Debug, Clone)]
pub struct ArchiveCommandBuilder {
    filter_program: String,
}

impl Default for ArchiveCommandBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_QZIP_PROGRAM)
    }
}

impl ArchiveCommandBuilder {
    /// `filter_program` is the compressor tar pipes through (`-I`)
    pub fn new(filter_program: impl Into<String>) -> Self {
        Self {
            filter_program: filter_program.into(),
        }
    }

    /// Build the argument vector for `job`
    ///
    /// The archive path must come right after the mode flag since `f` is
    /// bundled into it.
    ///
    /// # Errors
    /// - BuildError::MissingArchivePath if the archive path is empty
    /// - BuildError::NoInputs when compressing with no inputs
    /// - BuildError::NonUtf8Path if any path is not UTF-8
    pub fn build(&self, job: &ArchiveJob) -> Result<ArgumentVector> {
        if job.archive.as_os_str().is_empty() {
            return Err(BuildError::MissingArchivePath);
        }
        if job.is_compress() && job.inputs.is_empty() {
            return Err(BuildError::NoInputs);
        }

        let mut args = ArgumentVector::new();
        args.push(match job.mode {
            ArchiveMode::Compress => TAR_CREATE,
            ArchiveMode::Extract => TAR_EXTRACT,
        });
        args.push_path(&job.archive)?;
        args.push_pair(TAR_FILTER, self.filter_command(job.mode));

        if let Some(destination) = &job.destination {
            args.push(TAR_DIRECTORY);
            args.push_path(destination)?;
        }

        if job.is_compress() {
            for input in &job.inputs {
                args.push_path(input)?;
            }
        }

        // Extract only: stripping while creating is left unsupported
        if job.mode == ArchiveMode::Extract && job.strip_components > 0 {
            args.push(format!("{}={}", TAR_STRIP_COMPONENTS, job.strip_components));
        }

        Ok(args)
    }

    fn filter_command(&self, mode: ArchiveMode) -> String {
        match mode {
            ArchiveMode::Compress => self.filter_program.clone(),
            ArchiveMode::Extract => format!("{} {}", self.filter_program, QZIP_DECOMPRESS),
        }
    }
}

/// Existence and naming checks run before tar is spawned
///
/// # Errors
/// - PreflightError::InputNotFound for the first missing input (compress)
/// - PreflightError::ArchiveNotFound if the archive is missing (extract)
/// - PreflightError::UnsupportedArchiveExtension if it is not `.tar.gz`/`.tgz`
pub fn preflight_archive(job: &ArchiveJob) -> std::result::Result<(), PreflightError> {
    match job.mode {
        ArchiveMode::Compress => match first_missing(&job.inputs) {
            Some(missing) => Err(PreflightError::InputNotFound(missing.to_path_buf())),
            None => Ok(()),
        },
        ArchiveMode::Extract => {
            if !job.archive.exists() {
                return Err(PreflightError::ArchiveNotFound(job.archive.clone()));
            }
            if !has_archive_extension(&job.archive) {
                return Err(PreflightError::UnsupportedArchiveExtension(
                    job.archive.clone(),
                ));
            }
            Ok(())
        }
    }
}
