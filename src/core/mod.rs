//! Core application plumbing
//!
//! - Configuration file loading and validation
//! - Startup error type
//! - Service assembly

pub mod app;
pub mod config;
pub mod error;

#[cfg(test)]
mod tests;

pub use config::{
    default_config_path, resolve_config_path, AppConfig, ConfigError, ConfigResult,
    CONFIG_ENV_VAR,
};
pub use app::{build_server, run};
pub use error::{AppError, Result};
