// Scratch Space Port
// Fixture files for the probe's compress/decompress round trip

use std::io;
use std::path::{Path, PathBuf};

/// Creates and removes throwaway files
pub trait ScratchSpace: Send + Sync {
    /// Create a new file of exactly `size_bytes` bytes and return its path
    fn create(&self, size_bytes: u64) -> io::Result<PathBuf>;

    /// Remove `path`; removing a file that does not exist is not an error
    fn remove(&self, path: &Path) -> io::Result<()>;
}

// ============================================================================
// Mock Implementations for Testing
// ============================================================================

pub mod mocks {
    use super::*;
    use std::sync::Mutex;

    /// Mock scratch space handing out a fixed path
    pub struct MockScratchSpace {
        path: PathBuf,
        fail_create: bool,
        created: Mutex<Vec<u64>>,
        removed: Mutex<Vec<PathBuf>>,
    }

    impl MockScratchSpace {
        pub fn new(path: impl Into<PathBuf>) -> Self {
            Self {
                path: path.into(),
                fail_create: false,
                created: Mutex::new(Vec::new()),
                removed: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                fail_create: true,
                ..Self::new("/nonexistent")
            }
        }

        /// Requested sizes of every created file
        pub fn created(&self) -> Vec<u64> {
            self.created.lock().unwrap().clone()
        }

        pub fn removed(&self) -> Vec<PathBuf> {
            self.removed.lock().unwrap().clone()
        }
    }

    impl ScratchSpace for MockScratchSpace {
        fn create(&self, size_bytes: u64) -> io::Result<PathBuf> {
            if self.fail_create {
                return Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"));
            }
            self.created.lock().unwrap().push(size_bytes);
            Ok(self.path.clone())
        }

        fn remove(&self, path: &Path) -> io::Result<()> {
            self.removed.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }
}
