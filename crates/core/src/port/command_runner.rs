// Command Runner Port
// Abstraction for running an external tool with a built argument vector

use crate::domain::ArgumentVector;
use thiserror::Error;

/// Output of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    pub exit_code: Option<i32>,
    /// stdout followed by stderr
    pub combined: String,
    pub duration_ms: i64,
}

/// Execution errors
///
/// Every variant that got as far as running the tool keeps its combined
/// output so callers can log the tool's own diagnostics.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error("Spawn failed for {program}: {reason}")]
    SpawnFailed { program: String, reason: String },

    #[error("{program} exited with status {}: {output}", display_code(.exit_code))]
    NonZeroExit {
        program: String,
        exit_code: Option<i32>,
        output: String,
    },

    #[error("{program} timed out after {timeout_ms}ms: {output}")]
    Timeout {
        program: String,
        timeout_ms: u64,
        output: String,
    },
}

fn display_code(code: &Option<i32>) -> String {
    code.map_or_else(|| "signal".to_string(), |c| c.to_string())
}

impl ExecError {
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            ExecError::NonZeroExit { exit_code, .. } => *exit_code,
            _ => None,
        }
    }

    /// Captured tool output; empty when the process never started
    pub fn combined_output(&self) -> &str {
        match self {
            ExecError::SpawnFailed { .. } => "",
            ExecError::NonZeroExit { output, .. } | ExecError::Timeout { output, .. } => output,
        }
    }
}

/// Command runner trait
///
/// Implementations:
/// - SubprocessExecutor: spawns the program as a child process
pub trait CommandRunner: Send + Sync {
    /// Run `program` with `args`, blocking until it exits
    ///
    /// # Errors
    /// - ExecError::SpawnFailed if the program cannot be started
    /// - ExecError::NonZeroExit if it exits unsuccessfully
    /// - ExecError::Timeout if the implementation enforces a deadline
    fn run(&self, program: &str, args: &ArgumentVector) -> Result<ExecOutput, ExecError>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Scripted response for one program
    #[derive(Debug, Clone)]
    pub enum MockResponse {
        /// Exit 0 with this output
        Success(String),
        /// Exit with a non-zero code and this output
        Exit(i32, String),
        /// Program could not be started
        SpawnFail(String),
    }

    /// One recorded invocation
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub struct RecordedCall {
        pub program: String,
        pub args: Vec<String>,
    }

    /// Mock command runner for testing
    ///
    /// Responses are looked up by `"<program> <first arg>"` first, then by
    /// `"<program>"`; unknown programs succeed with empty output.
    #[derive(Default)]
    pub struct MockCommandRunner {
        responses: Mutex<HashMap<String, MockResponse>>,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockCommandRunner {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn on(self, program: &str, response: MockResponse) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(program.to_string(), response);
            self
        }

        pub fn on_args(self, program: &str, first_arg: &str, response: MockResponse) -> Self {
            self.responses
                .lock()
                .unwrap()
                .insert(format!("{} {}", program, first_arg), response);
            self
        }

        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().unwrap().clone()
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    impl CommandRunner for MockCommandRunner {
        fn run(&self, program: &str, args: &ArgumentVector) -> Result<ExecOutput, ExecError> {
            self.calls.lock().unwrap().push(RecordedCall {
                program: program.to_string(),
                args: args.as_slice().to_vec(),
            });

            let responses = self.responses.lock().unwrap();
            let keyed = args
                .as_slice()
                .first()
                .and_then(|first| responses.get(&format!("{} {}", program, first)));
            let response = keyed
                .or_else(|| responses.get(program))
                .cloned()
                .unwrap_or_else(|| MockResponse::Success(String::new()));

            match response {
                MockResponse::Success(output) => Ok(ExecOutput {
                    exit_code: Some(0),
                    combined: output,
                    duration_ms: 1,
                }),
                MockResponse::Exit(code, output) => Err(ExecError::NonZeroExit {
                    program: program.to_string(),
                    exit_code: Some(code),
                    output,
                }),
                MockResponse::SpawnFail(reason) => Err(ExecError::SpawnFailed {
                    program: program.to_string(),
                    reason,
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mocks::{MockCommandRunner, MockResponse};
    use super::*;

    #[test]
    fn test_error_keeps_output() {
        let err = ExecError::NonZeroExit {
            program: "qzip".to_string(),
            exit_code: Some(2),
            output: "qzip: cannot open input".to_string(),
        };

        assert_eq!(err.exit_code(), Some(2));
        assert_eq!(err.combined_output(), "qzip: cannot open input");
        assert!(err.to_string().contains("status 2"));
    }

    #[test]
    fn test_mock_prefers_first_arg_response() {
        let runner = MockCommandRunner::new()
            .on("qzip", MockResponse::Success("ok".to_string()))
            .on_args("qzip", "--version", MockResponse::Exit(1, "bad".to_string()));

        let version = ArgumentVector::from(vec!["--version".to_string()]);
        let other = ArgumentVector::from(vec!["-k".to_string()]);

        assert!(runner.run("qzip", &version).is_err());
        assert_eq!(runner.run("qzip", &other).unwrap().combined, "ok");
        assert_eq!(runner.call_count(), 2);
    }
}
