//! omega-bench library
//!
//! A micro-benchmark harness for numeric special functions. Cases are
//! registered on an explicit [`BenchRunner`], executed sequentially with
//! warmup and measured invocations, and reported as one line of statistics
//! per case.
//!
//! # Examples
//!
//! Basic usage:
//!
//! ```rust
//! use omega_bench::{cases, report, BenchRunner, RngSource};
//!
//! let mut runner = BenchRunner::new();
//! runner.register(
//!     "lambertw",
//!     cases::lambertw(RngSource::seeded(7), cases::DEFAULT_DOMAIN),
//! )?;
//!
//! let outcome = runner.run_all(1, 5)?;
//! let line = report::format_outcome(&outcome.cases()[0]);
//! assert!(line.starts_with("lambertw: mean="));
//! assert!(line.ends_with("n=5"));
//! # Ok::<(), omega_bench::Error>(())
//! ```

pub mod cases;
pub mod config;
pub mod error;
pub mod random;
pub mod report;
pub mod result;
pub mod runner;

pub use config::{AppConfig, ConfigError, OutputTarget};
pub use error::{DuplicateNameError, Error, ExecutionError, OperationError, Phase, Result};
pub use random::{RandomSource, RngSource};
pub use report::Reporter;
pub use result::{BenchmarkResult, Sample, Statistics};
pub use runner::{BenchRunner, BenchmarkCase, CaseOutcome, FailurePolicy, RunOutcome};
