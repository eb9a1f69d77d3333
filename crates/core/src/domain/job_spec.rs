// Compression job description for the qzip tool

use std::path::PathBuf;
use std::str::FromStr;

/// Compress or decompress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
}

/// Compression algorithm selected with `-A`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Tool default (gzip-like); no flag is emitted
    #[default]
    Default,
    Gzip,
    GzipExt,
    Lz4,
    Lz4s,
}

impl Algorithm {
    /// Value passed after `-A`, `None` for the tool default
    pub fn flag_value(self) -> Option<&'static str> {
        match self {
            Algorithm::Default => None,
            Algorithm::Gzip => Some("gzip"),
            Algorithm::GzipExt => Some("gzipext"),
            Algorithm::Lz4 => Some("lz4"),
            Algorithm::Lz4s => Some("lz4s"),
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flag_value().unwrap_or("default"))
    }
}

impl FromStr for Algorithm {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Algorithm::Default),
            "gzip" => Ok(Algorithm::Gzip),
            "gzipext" => Ok(Algorithm::GzipExt),
            "lz4" => Ok(Algorithm::Lz4),
            "lz4s" => Ok(Algorithm::Lz4s),
            other => Err(format!("unknown algorithm: {}", other)),
        }
    }
}

/// Output header format selected with `-O`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderFormat {
    #[default]
    Default,
    Gzip,
    GzipExt,
    Lz4,
    Lz4s,
}

impl HeaderFormat {
    pub fn flag_value(self) -> Option<&'static str> {
        match self {
            HeaderFormat::Default => None,
            HeaderFormat::Gzip => Some("gzip"),
            HeaderFormat::GzipExt => Some("gzipext"),
            HeaderFormat::Lz4 => Some("lz4"),
            HeaderFormat::Lz4s => Some("lz4s"),
        }
    }

    /// Whether this header can be written by `algorithm`
    pub fn is_compatible_with(self, algorithm: Algorithm) -> bool {
        match self {
            HeaderFormat::Default => true,
            HeaderFormat::Gzip => algorithm == Algorithm::Gzip,
            HeaderFormat::GzipExt => algorithm == Algorithm::GzipExt,
            HeaderFormat::Lz4 => algorithm == Algorithm::Lz4,
            HeaderFormat::Lz4s => algorithm == Algorithm::Lz4s,
        }
    }
}

impl std::fmt::Display for HeaderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.flag_value().unwrap_or("default"))
    }
}

impl FromStr for HeaderFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(HeaderFormat::Default),
            "gzip" => Ok(HeaderFormat::Gzip),
            "gzipext" => Ok(HeaderFormat::GzipExt),
            "lz4" => Ok(HeaderFormat::Lz4),
            "lz4s" => Ok(HeaderFormat::Lz4s),
            other => Err(format!("unknown header format: {}", other)),
        }
    }
}

/// Compression level, always within 1..=9
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CompressionLevel(u8);

impl CompressionLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;
    pub const DEFAULT: CompressionLevel = CompressionLevel(5);

    pub fn new(level: u8) -> Option<Self> {
        (Self::MIN..=Self::MAX)
            .contains(&level)
            .then_some(CompressionLevel(level))
    }

    /// Out-of-range requests fall back to the default level instead of failing
    pub fn coerce(raw: i32) -> Self {
        u8::try_from(raw)
            .ok()
            .and_then(Self::new)
            .unwrap_or(Self::DEFAULT)
    }

    pub fn get(self) -> u8 {
        self.0
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }
}

impl Default for CompressionLevel {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl std::fmt::Display for CompressionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One compression or decompression request for qzip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobSpec {
    pub mode: Mode,
    pub inputs: Vec<PathBuf>,
    pub output: Option<PathBuf>,
    /// Inputs are directories; `output` is ignored
    pub directory: bool,
    /// Only honoured together with `directory`
    pub recursive: bool,
    pub keep_source: bool,
    pub busy_poll: bool,
    /// 0 leaves the tool's own default
    pub concurrency: u32,
    pub algorithm: Algorithm,
    /// Raw requested level; see [`JobSpec::effective_level`]
    pub level: i32,
    pub header: HeaderFormat,
}

impl JobSpec {
    /// Defaults: keep the source, tool-default algorithm, header and level
    pub fn new<I, P>(mode: Mode, inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            mode,
            inputs: inputs.into_iter().map(Into::into).collect(),
            output: None,
            directory: false,
            recursive: false,
            keep_source: true,
            busy_poll: false,
            concurrency: 0,
            algorithm: Algorithm::Default,
            level: i32::from(CompressionLevel::DEFAULT.get()),
            header: HeaderFormat::Default,
        }
    }

    pub fn compress<I, P>(inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(Mode::Compress, inputs)
    }

    pub fn decompress<I, P>(inputs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self::new(Mode::Decompress, inputs)
    }

    pub fn is_compress(&self) -> bool {
        self.mode == Mode::Compress
    }

    /// Level after coercing out-of-range requests to the default
    pub fn effective_level(&self) -> CompressionLevel {
        CompressionLevel::coerce(self.level)
    }
}
