//! Logging setup for the command-line front-end

pub mod config;
pub mod tracing_config;

pub use config::{LogConfig, LogFormat};
pub use tracing_config::init_tracing;
