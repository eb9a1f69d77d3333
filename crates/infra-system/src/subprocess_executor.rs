// Subprocess executor
// Blocking std::process runner; stdout/stderr are drained on helper threads so
// a chatty child never stalls on a full pipe.
use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{info, warn};

use qzipctl_core::domain::ArgumentVector;
use qzipctl_core::port::{CommandRunner, ExecError, ExecOutput, TimeProvider};

/// try_wait polling period while a deadline is armed
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Time between SIGTERM and SIGKILL
const GRACEFUL_TIMEOUT: Duration = Duration::from_secs(2);

enum WaitOutcome {
    Exited(ExitStatus),
    TimedOut,
}

/// Subprocess executor
pub struct SubprocessExecutor {
    time_provider: Arc<dyn TimeProvider>,
    timeout: Option<Duration>,
}

impl SubprocessExecutor {
    /// Create a new subprocess executor without a deadline
    ///
    /// # Arguments
    /// * `time_provider` - Time provider for duration tracking
    pub fn new(time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            time_provider,
            timeout: None,
        }
    }

    /// Terminate children that run longer than `timeout`
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn spawn(&self, program: &str, args: &ArgumentVector) -> Result<Child, ExecError> {
        let mut command = Command::new(program);
        command
            .args(args.as_slice())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        // Own process group so a timeout also reaches grandchildren holding the pipes
        #[cfg(unix)]
        if self.timeout.is_some() {
            use std::os::unix::process::CommandExt;
            command.process_group(0);
        }

        command
            .spawn()
            .map_err(|e| ExecError::SpawnFailed {
                program: program.to_string(),
                reason: e.to_string(),
            })
    }

    fn wait(&self, child: &mut Child) -> std::io::Result<WaitOutcome> {
        let Some(timeout) = self.timeout else {
            return child.wait().map(WaitOutcome::Exited);
        };

        let deadline = Instant::now() + timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(WaitOutcome::Exited(status));
            }
            if Instant::now() >= deadline {
                terminate(child)?;
                return Ok(WaitOutcome::TimedOut);
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl CommandRunner for SubprocessExecutor {
    fn run(&self, program: &str, args: &ArgumentVector) -> Result<ExecOutput, ExecError> {
        let start_time = self.time_provider.now_millis();

        info!(
            program = %program,
            args = %args,
            timeout_ms = ?self.timeout.map(|t| t.as_millis()),
            "Starting subprocess execution"
        );

        let mut child = self.spawn(program, args)?;
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let outcome = self.wait(&mut child).map_err(|e| ExecError::SpawnFailed {
            program: program.to_string(),
            reason: format!("wait failed: {}", e),
        });
        if outcome.is_err() {
            // Readers only finish once the child's pipes close
            let _ = child.kill();
        }

        let mut combined = collect(stdout);
        combined.push_str(&collect(stderr));
        let duration_ms = self.time_provider.now_millis() - start_time;

        match outcome? {
            WaitOutcome::TimedOut => {
                let timeout_ms = self.timeout.map_or(0, |t| t.as_millis() as u64);
                warn!(program = %program, timeout_ms, "Subprocess timed out");
                Err(ExecError::Timeout {
                    program: program.to_string(),
                    timeout_ms,
                    output: combined,
                })
            }
            WaitOutcome::Exited(status) if status.success() => {
                info!(
                    program = %program,
                    duration_ms = %duration_ms,
                    exit_code = ?status.code(),
                    "Subprocess execution completed"
                );
                Ok(ExecOutput {
                    exit_code: status.code(),
                    combined,
                    duration_ms,
                })
            }
            WaitOutcome::Exited(status) => {
                warn!(
                    program = %program,
                    duration_ms = %duration_ms,
                    exit_code = ?status.code(),
                    "Subprocess exited unsuccessfully"
                );
                Err(ExecError::NonZeroExit {
                    program: program.to_string(),
                    exit_code: status.code(),
                    output: combined,
                })
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            // A read error only truncates the captured output
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn collect(handle: JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

/// Kill the child's process group with SIGTERM first, then SIGKILL
///
/// SIGKILL goes to the group even when the leader left during the grace
/// period, since its descendants may still hold the output pipes.
#[cfg(unix)]
fn terminate(child: &mut Child) -> std::io::Result<()> {
    use nix::sys::signal::{killpg, Signal};
    use nix::unistd::Pid;

    let pgid = Pid::from_raw(child.id() as i32);
    info!(pgid = %pgid, "Sending SIGTERM to timed out process group");
    if killpg(pgid, Signal::SIGTERM).is_ok() {
        let grace_deadline = Instant::now() + GRACEFUL_TIMEOUT;
        while Instant::now() < grace_deadline {
            if child.try_wait()?.is_some() {
                info!(pgid = %pgid, "Process exited after SIGTERM");
                break;
            }
            thread::sleep(POLL_INTERVAL);
        }
    }

    // ESRCH once the whole group is gone
    if killpg(pgid, Signal::SIGKILL).is_ok() {
        warn!(pgid = %pgid, "Sent SIGKILL to timed out process group");
    }
    child.wait().map(|_| ())
}

#[cfg(not(unix))]
fn terminate(child: &mut Child) -> std::io::Result<()> {
    child.kill()?;
    child.wait().map(|_| ())
}

#[cfg(test)]
mod tests {
    use super::*;
    use qzipctl_core::port::time_provider::mocks::FixedTimeProvider;
    use qzipctl_core::port::time_provider::SystemTimeProvider;

    fn argv(args: &[&str]) -> ArgumentVector {
        ArgumentVector::from(args.iter().map(|s| s.to_string()).collect::<Vec<_>>())
    }

    fn executor() -> SubprocessExecutor {
        SubprocessExecutor::new(Arc::new(SystemTimeProvider))
    }

    #[test]
    fn test_execute_success() {
        let output = executor().run("echo", &argv(&["hello"])).unwrap();

        assert_eq!(output.exit_code, Some(0));
        assert!(output.combined.contains("hello"));
        assert!(output.duration_ms >= 0);
    }

    #[test]
    fn test_stdout_before_stderr() {
        let output = executor()
            .run("sh", &argv(&["-c", "echo err >&2; echo out"]))
            .unwrap();

        assert_eq!(output.combined, "out\nerr\n");
    }

    #[test]
    fn test_spawn_failure() {
        let result = executor().run("/nonexistent/qzipctl-tool", &argv(&[]));
        assert!(matches!(result, Err(ExecError::SpawnFailed { .. })));
    }

    #[test]
    fn test_non_zero_exit_keeps_output() {
        let err = executor()
            .run("sh", &argv(&["-c", "echo broken; exit 4"]))
            .unwrap_err();

        assert_eq!(err.exit_code(), Some(4));
        assert_eq!(err.combined_output(), "broken\n");
    }

    #[test]
    fn test_execute_timeout() {
        let result = executor()
            .with_timeout(Duration::from_millis(100))
            .run("sleep", &argv(&["10"]));

        assert!(matches!(
            result,
            Err(ExecError::Timeout {
                timeout_ms: 100,
                ..
            })
        ));
    }

    #[test]
    fn test_duration_from_time_provider() {
        let output = SubprocessExecutor::new(Arc::new(FixedTimeProvider(1_000)))
            .run("true", &argv(&[]))
            .unwrap();

        assert_eq!(output.duration_ms, 0);
    }

    #[cfg(unix)]
    #[test]
    fn test_timeout_kills_background_descendants() {
        let started = Instant::now();
        let result = executor()
            .with_timeout(Duration::from_millis(200))
            .run("sh", &argv(&["-c", "sleep 6; echo done"]));

        assert!(matches!(result, Err(ExecError::Timeout { .. })));
        assert!(started.elapsed() < Duration::from_secs(5));
    }
}
