// Process-global environment and working directory adapters

use std::io;
use std::path::{Path, PathBuf};

use qzipctl_core::port::{EnvProvider, WorkingDirectory};

/// Reads the real process environment
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessEnv;

impl EnvProvider for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

/// The real process working directory (shared by every thread)
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessWorkingDirectory;

impl WorkingDirectory for ProcessWorkingDirectory {
    fn current(&self) -> io::Result<PathBuf> {
        std::env::current_dir()
    }

    fn change_to(&self, path: &Path) -> io::Result<()> {
        std::env::set_current_dir(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reads_path_variable() {
        assert!(ProcessEnv.var("PATH").is_some());
        assert!(ProcessEnv.var("QZIPCTL_SURELY_UNSET_VARIABLE").is_none());
    }

    #[test]
    fn test_change_to_missing_directory_fails() {
        let err = ProcessWorkingDirectory
            .change_to(Path::new("/nonexistent/qzipctl/dir"))
            .unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
