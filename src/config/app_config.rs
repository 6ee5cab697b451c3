//! Application configuration module
//!
//! This module provides the main application configuration structure that combines
//! CLI arguments with environment values using a clear priority system.

use super::env_config::EnvConfig;
use super::env_reader::{EnvReader, SystemEnvReader};
use super::ConfigError;
use crate::runner::FailurePolicy;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// Default number of unmeasured invocations per case
pub const DEFAULT_WARMUP: usize = 10;
/// Default number of measured invocations per case
pub const DEFAULT_ITERATIONS: usize = 1000;

/// CLI arguments structure
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CliArgs {
    /// Warmup iterations per case
    pub warmup: Option<usize>,
    /// Measured iterations per case
    pub iterations: Option<usize>,
    /// Report destination (`stdout`, `-` or a path)
    pub output: Option<String>,
    /// Seed for reproducible inputs
    pub seed: Option<u64>,
    /// Overall timeout in seconds
    pub timeout: Option<f64>,
    /// Stop after the first failing case
    pub fail_fast: bool,
    /// Restrict the run to these built-in cases
    pub cases: Vec<String>,
}

/// Where the report is written
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum OutputTarget {
    /// Standard output
    #[default]
    Stdout,
    /// A file, created or truncated
    File(PathBuf),
}

impl OutputTarget {
    /// Parse `stdout`/`-` or a path
    pub fn parse(value: &str) -> Self {
        match value.trim() {
            "-" | "stdout" => OutputTarget::Stdout,
            path => OutputTarget::File(PathBuf::from(path)),
        }
    }
}

impl fmt::Display for OutputTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputTarget::Stdout => write!(f, "stdout"),
            OutputTarget::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    warmup: usize,
    iterations: usize,
    output: OutputTarget,
    seed: Option<u64>,
    timeout: Option<Duration>,
    failure_policy: FailurePolicy,
    cases: Vec<String>,
}

/// Configuration builder for functional composition
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    warmup: Option<usize>,
    iterations: Option<usize>,
    output: Option<OutputTarget>,
    seed: Option<u64>,
    timeout: Option<Duration>,
    failure_policy: FailurePolicy,
    cases: Vec<String>,
}

impl ConfigBuilder {
    /// Create a new configuration builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set warmup count
    #[must_use]
    pub const fn with_warmup(mut self, warmup: Option<usize>) -> Self {
        self.warmup = warmup;
        self
    }

    /// Set measured iteration count
    #[must_use]
    pub const fn with_iterations(mut self, iterations: Option<usize>) -> Self {
        self.iterations = iterations;
        self
    }

    /// Set report destination
    #[must_use]
    pub fn with_output(mut self, output: Option<OutputTarget>) -> Self {
        self.output = output;
        self
    }

    /// Set input seed
    #[must_use]
    pub const fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Set overall timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set failure policy
    #[must_use]
    pub const fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Set case filter
    #[must_use]
    pub fn with_cases(mut self, cases: Vec<String>) -> Self {
        self.cases = cases;
        self
    }

    /// Build the final AppConfig
    pub fn build(self) -> AppConfig {
        AppConfig {
            warmup: self.warmup.unwrap_or(DEFAULT_WARMUP),
            iterations: self.iterations.unwrap_or(DEFAULT_ITERATIONS),
            output: self.output.unwrap_or_default(),
            seed: self.seed,
            timeout: self.timeout,
            failure_policy: self.failure_policy,
            cases: self.cases,
        }
    }
}

impl AppConfig {
    /// Create AppConfig from CLI arguments and the process environment
    ///
    /// Priority order:
    /// 1. CLI parameters (highest priority)
    /// 2. `OMEGA_BENCH_*` environment variables
    /// 3. Hardcoded defaults
    pub fn from_cli(cli_args: CliArgs) -> Result<Self, ConfigError> {
        Self::from_cli_with_reader(cli_args, &SystemEnvReader)
    }

    /// Create AppConfig from CLI arguments and an explicit environment reader
    pub fn from_cli_with_reader<R: EnvReader>(
        cli_args: CliArgs,
        reader: &R,
    ) -> Result<Self, ConfigError> {
        let failure_policy = if cli_args.fail_fast {
            FailurePolicy::Abort
        } else {
            FailurePolicy::Continue
        };

        let config_builder = ConfigBuilder::new()
            .with_warmup(Self::resolve_warmup(&cli_args, reader)?)
            .with_iterations(Self::resolve_iterations(&cli_args, reader)?)
            .with_output(Self::resolve_output(&cli_args, reader)?)
            .with_seed(Self::resolve_seed(&cli_args, reader)?)
            .with_timeout(Self::resolve_timeout(&cli_args, reader)?)
            .with_failure_policy(failure_policy)
            .with_cases(cli_args.cases);

        Ok(config_builder.build())
    }

    fn resolve_warmup<R: EnvReader>(
        cli_args: &CliArgs,
        reader: &R,
    ) -> Result<Option<usize>, ConfigError> {
        cli_args
            .warmup
            .map(|w| Ok(Some(w)))
            .unwrap_or_else(|| EnvConfig::get_warmup_with_reader(reader))
    }

    fn resolve_iterations<R: EnvReader>(
        cli_args: &CliArgs,
        reader: &R,
    ) -> Result<Option<usize>, ConfigError> {
        match cli_args.iterations {
            Some(0) => Err(ConfigError::InvalidCliArgument {
                argument: "--iterations".to_owned(),
                value: "0".to_owned(),
                expected: "a positive integer".to_owned(),
            }),
            Some(n) => Ok(Some(n)),
            None => EnvConfig::get_iterations_with_reader(reader),
        }
    }

    fn resolve_output<R: EnvReader>(
        cli_args: &CliArgs,
        reader: &R,
    ) -> Result<Option<OutputTarget>, ConfigError> {
        let raw = match &cli_args.output {
            Some(value) if value.trim().is_empty() => {
                return Err(ConfigError::InvalidCliArgument {
                    argument: "--output".to_owned(),
                    value: value.clone(),
                    expected: "a file path, 'stdout' or '-'".to_owned(),
                })
            }
            Some(value) => Some(value.clone()),
            None => EnvConfig::get_output_with_reader(reader)?,
        };
        Ok(raw.as_deref().map(OutputTarget::parse))
    }

    fn resolve_seed<R: EnvReader>(
        cli_args: &CliArgs,
        reader: &R,
    ) -> Result<Option<u64>, ConfigError> {
        cli_args
            .seed
            .map(|s| Ok(Some(s)))
            .unwrap_or_else(|| EnvConfig::get_seed_with_reader(reader))
    }

    fn resolve_timeout<R: EnvReader>(
        cli_args: &CliArgs,
        reader: &R,
    ) -> Result<Option<Duration>, ConfigError> {
        match cli_args.timeout {
            Some(secs) => Duration::try_from_secs_f64(secs)
                .ok()
                .filter(|d| !d.is_zero())
                .map(Some)
                .ok_or_else(|| ConfigError::InvalidCliArgument {
                    argument: "--timeout".to_owned(),
                    value: secs.to_string(),
                    expected: "a positive number of seconds".to_owned(),
                }),
            None => EnvConfig::get_timeout_with_reader(reader),
        }
    }

    /// Unmeasured invocations per case
    pub fn warmup(&self) -> usize {
        self.warmup
    }

    /// Measured invocations per case
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Report destination
    pub fn output(&self) -> &OutputTarget {
        &self.output
    }

    /// Input seed, `None` for entropy
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Overall run timeout
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// What to do after a case fails
    pub fn failure_policy(&self) -> FailurePolicy {
        self.failure_policy
    }

    /// Selected built-in cases, empty for all
    pub fn cases(&self) -> &[String] {
        &self.cases
    }
}
