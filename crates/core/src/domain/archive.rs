// Archive job description for tar with qzip as the compression filter

use std::path::{Path, PathBuf};

/// Archive suffixes accepted for extraction (matched case-insensitively)
pub const ARCHIVE_EXTENSIONS: [&str; 2] = [".tar.gz", ".tgz"];

/// Create or extract an archive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveMode {
    Compress,
    Extract,
}

/// One archive create or extract request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveJob {
    pub mode: ArchiveMode,
    /// Paths to bundle (compress mode only)
    pub inputs: Vec<PathBuf>,
    pub archive: PathBuf,
    /// Passed to tar with `-C`
    pub destination: Option<PathBuf>,
    /// Leading path segments dropped on extraction; ignored when compressing
    pub strip_components: u32,
}

impl ArchiveJob {
    pub fn compress<I, P>(inputs: I, archive: impl Into<PathBuf>) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            mode: ArchiveMode::Compress,
            inputs: inputs.into_iter().map(Into::into).collect(),
            archive: archive.into(),
            destination: None,
            strip_components: 0,
        }
    }

    pub fn extract(
        archive: impl Into<PathBuf>,
        destination: Option<PathBuf>,
        strip_components: u32,
    ) -> Self {
        Self {
            mode: ArchiveMode::Extract,
            inputs: Vec::new(),
            archive: archive.into(),
            destination,
            strip_components,
        }
    }

    pub fn is_compress(&self) -> bool {
        self.mode == ArchiveMode::Compress
    }
}

/// Whether `path` ends with one of [`ARCHIVE_EXTENSIONS`]
pub fn has_archive_extension(path: &Path) -> bool {
    let name = path.to_string_lossy().to_ascii_lowercase();
    ARCHIVE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}
