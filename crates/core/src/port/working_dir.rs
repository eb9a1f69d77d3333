// Working Directory Port
// The process working directory is global state; the archive flow is its only user

use std::io;
use std::path::{Path, PathBuf};

/// Access to the process working directory
pub trait WorkingDirectory: Send + Sync {
    fn current(&self) -> io::Result<PathBuf>;

    fn change_to(&self, path: &Path) -> io::Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// In-memory working directory that records every change
    pub struct MockWorkingDirectory {
        current: Mutex<PathBuf>,
        history: Mutex<Vec<PathBuf>>,
        fail_on: Option<PathBuf>,
    }

    impl MockWorkingDirectory {
        pub fn new(start: impl Into<PathBuf>) -> Self {
            Self {
                current: Mutex::new(start.into()),
                history: Mutex::new(Vec::new()),
                fail_on: None,
            }
        }

        /// Refuse to change into `path`
        pub fn failing_on(mut self, path: impl Into<PathBuf>) -> Self {
            self.fail_on = Some(path.into());
            self
        }

        /// Every successful `change_to` target, in order
        pub fn history(&self) -> Vec<PathBuf> {
            self.history.lock().unwrap().clone()
        }
    }

    impl WorkingDirectory for MockWorkingDirectory {
        fn current(&self) -> io::Result<PathBuf> {
            Ok(self.current.lock().unwrap().clone())
        }

        fn change_to(&self, path: &Path) -> io::Result<()> {
            if self.fail_on.as_deref() == Some(path) {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("no such directory: {}", path.display()),
                ));
            }
            *self.current.lock().unwrap() = path.to_path_buf();
            self.history.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }
}
