// Run Job Use Case

use tracing::{info, warn};

use crate::application::option_builder::{preflight_job, OptionBuilder};
use crate::domain::{ArgumentVector, JobSpec};
use crate::error::{QzipError, Result};
use crate::port::{CommandRunner, ExecOutput, IdProvider};

/// Result of one successful qzip run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutcome {
    pub run_id: String,
    pub command: ArgumentVector,
    pub output: ExecOutput,
}

/// Execute one qzip job
///
/// Validation happens before the preflight, and both happen before anything
/// is spawned.
///
/// # Arguments
///
/// * `runner` - Process runner
/// * `id_provider` - Run id generator (injected for determinism)
/// * `program` - qzip program name or path
/// * `spec` - Job description
pub fn execute(
    runner: &dyn CommandRunner,
    id_provider: &dyn IdProvider,
    program: &str,
    spec: &JobSpec,
) -> Result<JobOutcome> {
    let command = OptionBuilder::build(spec)?;
    preflight_job(spec)?;

    let run_id = id_provider.generate_id();
    info!(
        run_id = %run_id,
        program = %program,
        args = %command,
        mode = ?spec.mode,
        "Starting compression job"
    );

    match runner.run(program, &command) {
        Ok(output) => {
            info!(
                run_id = %run_id,
                duration_ms = output.duration_ms,
                "Compression job completed"
            );
            Ok(JobOutcome {
                run_id,
                command,
                output,
            })
        }
        Err(e) => {
            warn!(
                run_id = %run_id,
                error = %e,
                output = %e.combined_output(),
                "Compression job failed"
            );
            Err(QzipError::Execution(e))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Algorithm, BuildError, HeaderFormat, PreflightError};
    use crate::port::command_runner::mocks::{MockCommandRunner, MockResponse};
    use crate::port::id_provider::mocks::SequentialIdProvider;

    fn input_file() -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, b"payload").unwrap();
        (dir, path)
    }

    #[test]
    fn test_runs_built_command() {
        let (_dir, path) = input_file();
        let runner = MockCommandRunner::new().on("qzip", MockResponse::Success("done".into()));
        let ids = SequentialIdProvider::default();

        let outcome = execute(&runner, &ids, "qzip", &JobSpec::compress([&path])).unwrap();

        assert_eq!(outcome.run_id, "test-1");
        assert_eq!(outcome.output.combined, "done");
        let calls = runner.calls();
        assert_eq!(calls[0].program, "qzip");
        assert_eq!(calls[0].args, vec!["-k".to_string(), path.display().to_string()]);
    }

    #[test]
    fn test_missing_input_never_spawns() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("gone.txt");
        let runner = MockCommandRunner::new();

        let result = execute(
            &runner,
            &SequentialIdProvider::default(),
            "qzip",
            &JobSpec::compress([&missing]),
        );

        assert!(matches!(
            result,
            Err(QzipError::Preflight(PreflightError::InputNotFound(p))) if p == missing
        ));
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn test_invalid_spec_rejected_before_preflight() {
        let runner = MockCommandRunner::new();
        let spec = JobSpec {
            algorithm: Algorithm::Lz4,
            header: HeaderFormat::Gzip,
            ..JobSpec::compress(["/definitely/not/here"])
        };

        let result = execute(&runner, &SequentialIdProvider::default(), "qzip", &spec);

        assert!(matches!(
            result,
            Err(QzipError::Build(BuildError::HeaderAlgorithmMismatch { .. }))
        ));
        assert_eq!(runner.call_count(), 0);
    }

    #[test]
    fn test_tool_failure_keeps_output() {
        let (_dir, path) = input_file();
        let runner = MockCommandRunner::new()
            .on("qzip", MockResponse::Exit(1, "Error: qzInit failed".into()));

        let err = execute(
            &runner,
            &SequentialIdProvider::default(),
            "qzip",
            &JobSpec::compress([&path]),
        )
        .unwrap_err();

        assert_eq!(err.tool_output(), Some("Error: qzInit failed"));
    }
}
