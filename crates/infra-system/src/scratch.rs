// Scratch files for the probe's smoke test

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;

use qzipctl_core::port::{IdProvider, ScratchSpace};

const CHUNK_BYTES: usize = 1024 * 1024;
const FILE_PREFIX: &str = "qzipctl-smoke-";

/// Zero-filled files under a fixed directory
pub struct FsScratchSpace {
    dir: PathBuf,
    id_provider: Arc<dyn IdProvider>,
}

impl FsScratchSpace {
    pub fn new(dir: impl Into<PathBuf>, id_provider: Arc<dyn IdProvider>) -> Self {
        Self {
            dir: dir.into(),
            id_provider,
        }
    }
}

impl ScratchSpace for FsScratchSpace {
    fn create(&self, size_bytes: u64) -> io::Result<PathBuf> {
        let path = self
            .dir
            .join(format!("{}{}", FILE_PREFIX, self.id_provider.generate_id()));
        let mut file = File::create(&path)?;

        let chunk = vec![0u8; CHUNK_BYTES];
        let mut remaining = size_bytes;
        while remaining > 0 {
            let n = remaining.min(CHUNK_BYTES as u64) as usize;
            if let Err(e) = file.write_all(&chunk[..n]) {
                drop(file);
                let _ = std::fs::remove_file(&path);
                return Err(e);
            }
            remaining -= n as u64;
        }
        file.flush()?;

        debug!(path = %path.display(), size_bytes, "Created scratch file");
        Ok(path)
    }

    fn remove(&self, path: &Path) -> io::Result<()> {
        match std::fs::remove_file(path) {
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            other => other,
        }
    }
}
