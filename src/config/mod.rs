//! Configuration module for omega-bench
//!
//! This module provides a unified configuration system that combines CLI arguments
//! with environment variables using strict error handling and clear priority logic.
//!
//! # Architecture
//!
//! - [`env_reader`] - Low-level environment abstraction, mockable in tests
//! - [`env_config`] - Typed, validated `OMEGA_BENCH_*` lookups
//! - [`app_config`] - High-level application configuration with CLI integration
//!
//! # Priority Logic
//!
//! 1. CLI parameters (highest priority)
//! 2. Environment variables
//! 3. Hardcoded defaults (only when nothing is set)
//!
//! A value that is set but invalid is a [`ConfigError`]; it never falls back
//! to the default.
//!
//! # Usage
//!
//! ```rust
//! use omega_bench::config::{AppConfig, CliArgs, MockEnvReader};
//!
//! let cli_args = CliArgs {
//!     warmup: Some(1),
//!     iterations: Some(5),
//!     ..CliArgs::default()
//! };
//!
//! let config = AppConfig::from_cli_with_reader(cli_args, &MockEnvReader::new())?;
//! assert_eq!(config.iterations(), 5);
//! # Ok::<(), omega_bench::ConfigError>(())
//! ```

pub mod app_config;
pub mod env_config;
pub mod env_reader;

pub use app_config::{AppConfig, CliArgs, ConfigBuilder, OutputTarget};
pub use env_config::{ConfigError, EnvConfig};
pub use env_reader::{EnvError, EnvReader, MockEnvReader, SystemEnvReader};
