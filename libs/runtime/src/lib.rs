//! Process-level plumbing shared by the staffdir binaries:
//! layered configuration, logging initialization and home-dir resolution.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{
    default_logging_config, AppConfig, CliArgs, DatabaseConfig, LoggingConfig, Section,
    ServerConfig,
};
