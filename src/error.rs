//! Error handling module
//!
//! This module provides unified error handling for the omega-bench harness.
//! Registration errors are returned immediately to the caller; execution
//! errors are captured per case and carried inside a [`crate::RunOutcome`].

use std::fmt;
use thiserror::Error;

/// Result type alias for the harness
pub type Result<T> = std::result::Result<T, Error>;

/// Error produced by a benchmarked operation
pub type OperationError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main error type for the harness
#[derive(Debug, Error)]
pub enum Error {
    /// IO-related errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// A case with the same name is already registered
    #[error(transparent)]
    DuplicateName(#[from] DuplicateNameError),
    /// Case names must be non-empty
    #[error("Invalid case name: names must be non-empty")]
    InvalidName,
    /// A run needs at least one measured invocation per case
    #[error("Invalid measured count: at least one measured iteration is required")]
    InvalidMeasuredCount,
    /// Requested built-in case does not exist
    #[error("Unknown benchmark case '{name}' (available: {available})")]
    UnknownCase { name: String, available: String },
}

/// Raised when a case name collides with an existing registration
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Benchmark case '{name}' is already registered")]
pub struct DuplicateNameError {
    /// The colliding name
    pub name: String,
}

/// Phase of a case in which an invocation ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Unmeasured invocations before timing starts
    Warmup,
    /// Timed invocations
    Measurement,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Warmup => write!(f, "warmup"),
            Phase::Measurement => write!(f, "measurement"),
        }
    }
}

/// Raised when a benchmarked operation returns an error
#[derive(Debug, Error)]
#[error("case '{case}' failed during {phase} invocation {invocation}: {source}")]
pub struct ExecutionError {
    /// Name of the failing case
    pub case: String,
    /// Phase the failing invocation belonged to
    pub phase: Phase,
    /// 0-based invocation index within the phase
    pub invocation: usize,
    /// Underlying failure
    #[source]
    pub source: OperationError,
}

impl ExecutionError {
    /// Wrap an operation failure with its case and position
    pub fn new(
        case: impl Into<String>,
        phase: Phase,
        invocation: usize,
        source: impl Into<OperationError>,
    ) -> Self {
        Self {
            case: case.into(),
            phase,
            invocation,
            source: source.into(),
        }
    }
}

/// Functional extensions for Result types
pub trait ResultExt<T> {
    /// Add context to an IO error using a closure
    ///
    /// The context is prepended to the message while the error kind is kept,
    /// so callers can still match on [`std::io::ErrorKind`].
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| Error::Io(std::io::Error::new(e.kind(), format!("{}: {e}", f()))))
    }
}
