// qzipctl Core - Domain Logic & Ports
// NO infrastructure dependencies: processes, env and cwd are reached through ports

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;

pub use config::QzipConfig;
pub use error::{QzipError, Result};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
