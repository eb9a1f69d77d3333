// Tool names, flags and defaults (no magic values in the builders)

/// Primary compressor program
pub const DEFAULT_QZIP_PROGRAM: &str = "qzip";

/// Archiver program
pub const DEFAULT_TAR_PROGRAM: &str = "tar";

/// Accelerator service status command
pub const DEFAULT_STATUS_COMMAND: &str = "service qat_service status";

/// Environment variables that must point at the driver and QATzip installs
pub const DEFAULT_ICP_ROOT_VAR: &str = "ICP_ROOT";
pub const DEFAULT_QZ_ROOT_VAR: &str = "QZ_ROOT";

/// Smoke-test scratch directory
pub const DEFAULT_SCRATCH_DIR: &str = "/tmp";

/// Smoke-test scratch file size (1 GiB)
pub const DEFAULT_SMOKE_TEST_BYTES: u64 = 1024 * 1024 * 1024;

/// Argument used to check that a tool is installed
pub const VERSION_FLAG: &str = "--version";

/// Suffix qzip appends to compressed files
pub const COMPRESSED_SUFFIX: &str = ".gz";

// qzip flags
pub const QZIP_DECOMPRESS: &str = "-d";
pub const QZIP_KEEP_SOURCE: &str = "-k";
pub const QZIP_RECURSIVE: &str = "-R";
pub const QZIP_BUSY_POLL: &str = "-P";
pub const QZIP_BUSY_POLL_VALUE: &str = "busy";
pub const QZIP_ALGORITHM: &str = "-A";
pub const QZIP_HEADER: &str = "-O";
pub const QZIP_LEVEL: &str = "-L";
pub const QZIP_OUTPUT: &str = "-o";
pub const QZIP_CONCURRENCY: &str = "-r";

// tar flags
pub const TAR_CREATE: &str = "-cvf";
pub const TAR_EXTRACT: &str = "-xvf";
pub const TAR_FILTER: &str = "-I";
pub const TAR_DIRECTORY: &str = "-C";
pub const TAR_STRIP_COMPONENTS: &str = "--strip-components";
