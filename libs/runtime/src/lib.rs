//! Process-level plumbing shared by the server binary: layered configuration,
//! logging bootstrap, home directory resolution and shutdown signals.

pub mod config;
pub mod home_dir;
pub mod logging;
pub mod shutdown;

pub use config::{AppConfig, CliArgs, DatabaseConfig, LoggingConfig, ServerConfig};
