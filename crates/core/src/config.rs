// Runtime configuration resolved from the environment

use std::path::PathBuf;
use tracing::warn;

use crate::application::constants::*;
use crate::error::{QzipError, Result};
use crate::port::EnvProvider;

pub const ENV_QZIP_BIN: &str = "QZIPCTL_QZIP_BIN";
pub const ENV_TAR_BIN: &str = "QZIPCTL_TAR_BIN";
pub const ENV_STATUS_CMD: &str = "QZIPCTL_STATUS_CMD";
pub const ENV_SCRATCH_DIR: &str = "QZIPCTL_SCRATCH_DIR";
pub const ENV_SMOKE_TEST_BYTES: &str = "QZIPCTL_SMOKE_TEST_BYTES";
pub const ENV_ICP_ROOT_VAR: &str = "QZIPCTL_ICP_ROOT_VAR";
pub const ENV_QZ_ROOT_VAR: &str = "QZIPCTL_QZ_ROOT_VAR";

/// Programs, probe inputs and smoke-test sizing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QzipConfig {
    pub qzip_program: String,
    pub tar_program: String,
    /// Program followed by its arguments
    pub status_command: Vec<String>,
    pub icp_root_var: String,
    pub qz_root_var: String,
    pub scratch_dir: PathBuf,
    pub smoke_test_bytes: u64,
}

impl Default for QzipConfig {
    fn default() -> Self {
        Self {
            qzip_program: DEFAULT_QZIP_PROGRAM.to_string(),
            tar_program: DEFAULT_TAR_PROGRAM.to_string(),
            status_command: split_command(DEFAULT_STATUS_COMMAND),
            icp_root_var: DEFAULT_ICP_ROOT_VAR.to_string(),
            qz_root_var: DEFAULT_QZ_ROOT_VAR.to_string(),
            scratch_dir: PathBuf::from(DEFAULT_SCRATCH_DIR),
            smoke_test_bytes: DEFAULT_SMOKE_TEST_BYTES,
        }
    }
}

impl QzipConfig {
    /// Overlay `QZIPCTL_*` variables on the defaults
    ///
    /// # Errors
    /// - QzipError::Config if the status command is set but blank
    pub fn from_env(env: &dyn EnvProvider) -> Result<Self> {
        let mut config = Self::default();

        if let Some(program) = env.non_empty(ENV_QZIP_BIN) {
            config.qzip_program = program;
        }
        if let Some(program) = env.non_empty(ENV_TAR_BIN) {
            config.tar_program = program;
        }
        if let Some(raw) = env.var(ENV_STATUS_CMD) {
            let command = split_command(&raw);
            if command.is_empty() {
                return Err(QzipError::Config(format!("{} is blank", ENV_STATUS_CMD)));
            }
            config.status_command = command;
        }
        if let Some(name) = env.non_empty(ENV_ICP_ROOT_VAR) {
            config.icp_root_var = name;
        }
        if let Some(name) = env.non_empty(ENV_QZ_ROOT_VAR) {
            config.qz_root_var = name;
        }
        if let Some(dir) = env.non_empty(ENV_SCRATCH_DIR) {
            config.scratch_dir = PathBuf::from(dir);
        }
        if let Some(raw) = env.non_empty(ENV_SMOKE_TEST_BYTES) {
            match raw.trim().parse::<u64>() {
                Ok(bytes) if bytes > 0 => config.smoke_test_bytes = bytes,
                _ => warn!(
                    value = %raw,
                    default = config.smoke_test_bytes,
                    "Invalid {}, using default", ENV_SMOKE_TEST_BYTES
                ),
            }
        }

        Ok(config)
    }
}

fn split_command(raw: &str) -> Vec<String> {
    raw.split_whitespace().map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::port::env_provider::mocks::MockEnvProvider;

    #[test]
    fn test_defaults_without_env() {
        let config = QzipConfig::from_env(&MockEnvProvider::new()).unwrap();
        assert_eq!(config, QzipConfig::default());
        assert_eq!(config.status_command, vec!["service", "qat_service", "status"]);
    }

    #[test]
    fn test_env_overrides() {
        let env = MockEnvProvider::new()
            .with(ENV_QZIP_BIN, "/usr/local/bin/qzip")
            .with(ENV_STATUS_CMD, "adf_ctl status")
            .with(ENV_SMOKE_TEST_BYTES, "4096");

        let config = QzipConfig::from_env(&env).unwrap();
        assert_eq!(config.qzip_program, "/usr/local/bin/qzip");
        assert_eq!(config.status_command, vec!["adf_ctl", "status"]);
        assert_eq!(config.smoke_test_bytes, 4096);
    }

    #[test]
    fn test_invalid_size_keeps_default() {
        let env = MockEnvProvider::new().with(ENV_SMOKE_TEST_BYTES, "lots");
        let config = QzipConfig::from_env(&env).unwrap();
        assert_eq!(config.smoke_test_bytes, DEFAULT_SMOKE_TEST_BYTES);
    }

    #[test]
    fn test_blank_status_command_rejected() {
        let env = MockEnvProvider::new().with(ENV_STATUS_CMD, "   ");
        let result = QzipConfig::from_env(&env);
        assert!(matches!(result, Err(QzipError::Config(_))));
    }
}
