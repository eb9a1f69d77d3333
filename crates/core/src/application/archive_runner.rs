// Archive runner - runs tar from the data's parent directory
//
// Archives must only contain paths relative to a common parent, whatever the
// caller's working directory is. The runner records the working directory,
// switches to the data parent, runs tar with basenames and always switches
// back. The working directory is process-wide, so the whole sequence holds
// WORKDIR_LOCK.

use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::{error, info, warn};

use crate::application::archive_builder::{preflight_archive, ArchiveCommandBuilder};
use crate::config::QzipConfig;
use crate::domain::{ArchiveJob, ArchiveMode, BuildError};
use crate::error::{QzipError, Result};
use crate::port::{CommandRunner, ExecOutput, WorkingDirectory};

static WORKDIR_LOCK: Mutex<()> = Mutex::new(());

/// Archive job rewritten for execution from `data_parent`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedArchive {
    pub data_parent: PathBuf,
    pub job: ArchiveJob,
}

/// Copy of `job` with every path made absolute against `cwd` and lexically
/// cleaned (`.` dropped, `..` folded into its parent).
pub fn resolve_archive_job(job: &ArchiveJob, cwd: &Path) -> ArchiveJob {
    ArchiveJob {
        mode: job.mode,
        inputs: job.inputs.iter().map(|p| absolute(p, cwd)).collect(),
        archive: absolute(&job.archive, cwd),
        destination: job.destination.as_deref().map(|d| absolute(d, cwd)),
        strip_components: job.strip_components,
    }
}

/// Rewrite `job` so it can run from its data parent.
///
/// Relative paths are resolved against `cwd` first. Compress: the data parent
/// is the first input's parent and every input becomes its final segment.
/// Extract: the data parent is the archive's parent.
///
/// # Errors
/// - BuildError::NoFileName if an input resolves to a filesystem root
pub fn normalize_archive_job(
    job: &ArchiveJob,
    cwd: &Path,
) -> std::result::Result<NormalizedArchive, BuildError> {
    let resolved = resolve_archive_job(job, cwd);

    let (data_parent, inputs) = match resolved.mode {
        ArchiveMode::Compress => {
            let inputs = &resolved.inputs;
            let data_parent = inputs
                .first()
                .map(|first| parent_or(first, cwd))
                .unwrap_or_else(|| cwd.to_path_buf());

            for input in inputs.iter().skip(1) {
                if parent_or(input, cwd) != data_parent {
                    warn!(
                        input = %input.display(),
                        data_parent = %data_parent.display(),
                        "Input is not a sibling of the first input; tar will resolve it under the data parent"
                    );
                }
            }

            let relative = inputs
                .iter()
                .map(|p| basename(p))
                .collect::<std::result::Result<Vec<_>, _>>()?;
            (data_parent, relative)
        }
        ArchiveMode::Extract => (parent_or(&resolved.archive, cwd), Vec::new()),
    };

    Ok(NormalizedArchive {
        data_parent,
        job: ArchiveJob { inputs, ..resolved },
    })
}

fn absolute(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };
    clean(&joined)
}

/// Lexical cleanup; `..` at the root stays at the root
fn clean(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                } else if !out.has_root() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

fn parent_or(path: &Path, fallback: &Path) -> PathBuf {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(fallback)
        .to_path_buf()
}

fn basename(path: &Path) -> std::result::Result<PathBuf, BuildError> {
    path.file_name()
        .map(PathBuf::from)
        .ok_or_else(|| BuildError::NoFileName(path.to_path_buf()))
}

/// Restores the recorded working directory when dropped
pub struct WorkdirGuard<'a> {
    workdir: &'a dyn WorkingDirectory,
    original: PathBuf,
}

impl<'a> WorkdirGuard<'a> {
    pub fn new(workdir: &'a dyn WorkingDirectory, original: PathBuf) -> Self {
        Self { workdir, original }
    }

    pub fn original(&self) -> &Path {
        &self.original
    }

    pub fn change_to(&self, path: &Path) -> Result<()> {
        self.workdir
            .change_to(path)
            .map_err(|source| QzipError::WorkingDirectory {
                path: path.to_path_buf(),
                source,
            })
    }
}

impl Drop for WorkdirGuard<'_> {
    fn drop(&mut self) {
        if let Err(e) = self.workdir.change_to(&self.original) {
            error!(
                original = %self.original.display(),
                error = %e,
                "Failed to restore working directory"
            );
        }
    }
}

/// Runs archive jobs through tar
pub struct ArchiveRunner {
    runner: Arc<dyn CommandRunner>,
    workdir: Arc<dyn WorkingDirectory>,
    builder: ArchiveCommandBuilder,
    tar_program: String,
}

impl ArchiveRunner {
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        workdir: Arc<dyn WorkingDirectory>,
        config: &QzipConfig,
    ) -> Self {
        Self {
            runner,
            workdir,
            builder: ArchiveCommandBuilder::new(config.qzip_program.clone()),
            tar_program: config.tar_program.clone(),
        }
    }

    /// Validate, normalize and run `job`
    ///
    /// The working directory is back to its recorded value when this returns,
    /// on success and on every error path.
    ///
    /// Relative paths are resolved against the recorded working directory,
    /// both for the existence checks and for the command line.
    ///
    /// # Errors
    /// - QzipError::Build / QzipError::Preflight before anything runs
    /// - QzipError::WorkingDirectory if the data parent cannot be entered
    /// - QzipError::Execution if tar fails (with its output)
    pub fn run(&self, job: &ArchiveJob) -> Result<ExecOutput> {
        if job.is_compress() && job.inputs.is_empty() {
            return Err(BuildError::NoInputs.into());
        }

        let _lock = WORKDIR_LOCK.lock().unwrap_or_else(PoisonError::into_inner);

        let original = self.workdir.current()?;
        let resolved = resolve_archive_job(job, &original);
        preflight_archive(&resolved)?;
        let normalized = normalize_archive_job(&resolved, &original)?;

        let guard = WorkdirGuard::new(self.workdir.as_ref(), original);

        info!(
            data_parent = %normalized.data_parent.display(),
            original = %guard.original().display(),
            "Entering data parent directory"
        );
        guard.change_to(&normalized.data_parent)?;

        let args = self.builder.build(&normalized.job)?;
        info!(program = %self.tar_program, args = %args, "Executing archive command");

        let output = self.runner.run(&self.tar_program, &args)?;
        info!(
            program = %self.tar_program,
            duration_ms = output.duration_ms,
            "Archive command completed"
        );
        Ok(output)
    }
}
