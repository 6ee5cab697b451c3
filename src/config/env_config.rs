//! Environment configuration module
//!
//! Typed accessors for the `OMEGA_BENCH_*` variables with validation. A value
//! that is set but malformed is an error; only unset variables fall back to
//! defaults.

use super::env_reader::{EnvError, EnvReader};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Warmup iterations per case
pub const WARMUP_VAR: &str = "OMEGA_BENCH_WARMUP";
/// Measured iterations per case
pub const ITERATIONS_VAR: &str = "OMEGA_BENCH_ITERATIONS";
/// Report destination
pub const OUTPUT_VAR: &str = "OMEGA_BENCH_OUTPUT";
/// Seed for the input generator
pub const SEED_VAR: &str = "OMEGA_BENCH_SEED";
/// Overall run timeout in seconds
pub const TIMEOUT_VAR: &str = "OMEGA_BENCH_TIMEOUT";

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// Invalid CLI argument value
    #[error("Invalid CLI argument: {argument}='{value}' (expected: {expected})")]
    InvalidCliArgument {
        argument: String,
        value: String,
        expected: String,
    },
    /// Invalid environment variable value
    #[error("Invalid environment value: {key}='{value}' (expected: {expected})")]
    InvalidEnvValue {
        key: String,
        value: String,
        expected: String,
    },
    /// Environment variable could not be read
    #[error("Environment error: {0}")]
    Env(#[from] EnvError),
}

/// Environment-backed configuration lookups
pub struct EnvConfig;

impl EnvConfig {
    /// Warmup count from the given reader
    pub fn get_warmup_with_reader<R: EnvReader>(reader: &R) -> Result<Option<usize>, ConfigError> {
        Self::parse_var(reader, WARMUP_VAR, "a non-negative integer")
    }

    /// Measured iteration count from the given reader; zero is rejected
    pub fn get_iterations_with_reader<R: EnvReader>(
        reader: &R,
    ) -> Result<Option<usize>, ConfigError> {
        match Self::parse_var::<R, usize>(reader, ITERATIONS_VAR, "a positive integer")? {
            Some(0) => Err(Self::invalid(ITERATIONS_VAR, "0", "a positive integer")),
            other => Ok(other),
        }
    }

    /// Output target string from the given reader; blank values are rejected
    pub fn get_output_with_reader<R: EnvReader>(reader: &R) -> Result<Option<String>, ConfigError> {
        match reader.get_var(OUTPUT_VAR)? {
            Some(value) if value.trim().is_empty() => Err(Self::invalid(
                OUTPUT_VAR,
                &value,
                "a file path, 'stdout' or '-'",
            )),
            other => Ok(other.map(|v| v.trim().to_owned())),
        }
    }

    /// Input generator seed from the given reader
    pub fn get_seed_with_reader<R: EnvReader>(reader: &R) -> Result<Option<u64>, ConfigError> {
        Self::parse_var(reader, SEED_VAR, "an unsigned 64-bit integer")
    }

    /// Overall timeout from the given reader
    pub fn get_timeout_with_reader<R: EnvReader>(
        reader: &R,
    ) -> Result<Option<Duration>, ConfigError> {
        const EXPECTED: &str = "a positive number of seconds";
        match Self::parse_var::<R, f64>(reader, TIMEOUT_VAR, EXPECTED)? {
            Some(secs) => Duration::try_from_secs_f64(secs)
                .ok()
                .filter(|d| !d.is_zero())
                .map(Some)
                .ok_or_else(|| Self::invalid(TIMEOUT_VAR, &secs.to_string(), EXPECTED)),
            None => Ok(None),
        }
    }

    fn parse_var<R: EnvReader, T: FromStr>(
        reader: &R,
        key: &str,
        expected: &str,
    ) -> Result<Option<T>, ConfigError> {
        reader
            .get_var(key)?
            .map(|value| {
                value
                    .trim()
                    .parse::<T>()
                    .map_err(|_| Self::invalid(key, &value, expected))
            })
            .transpose()
    }

    fn invalid(key: &str, value: &str, expected: &str) -> ConfigError {
        ConfigError::InvalidEnvValue {
            key: key.to_owned(),
            value: value.to_owned(),
            expected: expected.to_owned(),
        }
    }
}
