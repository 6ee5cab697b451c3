//! Benchmark runner.
//!
//! A [`BenchRunner`] owns its registered cases and runs them sequentially on
//! the calling thread: warmup invocations first, then measured invocations
//! timed with [`Instant`].

use std::hint::black_box;
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use crate::error::{DuplicateNameError, Error, ExecutionError, OperationError, Phase, Result};
use crate::result::{BenchmarkResult, Sample};

/// Upper bound on samples reserved up front; larger runs grow between invocations.
const MAX_PREALLOCATED_SAMPLES: usize = 1 << 16;

/// Boxed benchmark operation. Values are routed through [`black_box`].
type Operation = Box<dyn FnMut() -> std::result::Result<(), OperationError>>;

/// What the runner does once a case has failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Record the failure and run the remaining cases.
    #[default]
    Continue,
    /// Record the failure and skip every remaining case.
    Abort,
}

/// A named operation registered with a runner.
pub struct BenchmarkCase {
    name: String,
    operation: Operation,
}

impl BenchmarkCase {
    /// Name the case was registered under.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BenchmarkCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Outcome of a single case.
#[derive(Debug)]
pub enum CaseOutcome {
    /// Every invocation succeeded.
    Completed(BenchmarkResult),
    /// An invocation failed; remaining invocations of the case were skipped.
    Failed(ExecutionError),
}

impl CaseOutcome {
    /// Name of the case this outcome belongs to.
    pub fn case_name(&self) -> &str {
        match self {
            CaseOutcome::Completed(result) => result.case_name(),
            CaseOutcome::Failed(error) => &error.case,
        }
    }
}

/// Per-case outcomes of a run, in registration order.
///
/// Cases that never started (or were cut off by the timeout) are absent.
#[derive(Debug, Default)]
pub struct RunOutcome {
    cases: Vec<CaseOutcome>,
    timed_out: bool,
    aborted: bool,
}

impl RunOutcome {
    /// All recorded outcomes.
    pub fn cases(&self) -> &[CaseOutcome] {
        &self.cases
    }

    /// Successful results only.
    pub fn results(&self) -> impl Iterator<Item = &BenchmarkResult> {
        self.cases.iter().filter_map(|case| match case {
            CaseOutcome::Completed(result) => Some(result),
            CaseOutcome::Failed(_) => None,
        })
    }

    /// Failures only.
    pub fn failures(&self) -> impl Iterator<Item = &ExecutionError> {
        self.cases.iter().filter_map(|case| match case {
            CaseOutcome::Failed(error) => Some(error),
            CaseOutcome::Completed(_) => None,
        })
    }

    /// True when the overall timeout stopped the run.
    pub fn timed_out(&self) -> bool {
        self.timed_out
    }

    /// True when [`FailurePolicy::Abort`] skipped remaining cases.
    pub fn aborted(&self) -> bool {
        self.aborted
    }

    /// True when no case failed and the run was not cut short.
    pub fn is_success(&self) -> bool {
        !self.timed_out && self.failures().next().is_none()
    }
}

/// Result of running a single case against the deadline.
enum CaseRun {
    Finished(CaseOutcome),
    DeadlineReached,
}

/// Registry and executor of benchmark cases.
///
/// # Example
///
/// ```
/// use omega_bench::BenchRunner;
///
/// let mut runner = BenchRunner::new();
/// runner.register("square", || Ok::<_, std::io::Error>(3.0f64 * 3.0))?;
///
/// let outcome = runner.run_all(1, 5)?;
/// let result = outcome.results().next().unwrap();
/// assert_eq!(result.samples().len(), 5);
/// # Ok::<(), omega_bench::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct BenchRunner {
    cases: Vec<BenchmarkCase>,
    failure_policy: FailurePolicy,
    timeout: Option<Duration>,
}

impl BenchRunner {
    /// Creates an empty runner with the report-and-continue policy.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the failure policy.
    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Bounds the wall-clock time of each [`BenchRunner::run_all`] call.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Registers `operation` under `name`.
    ///
    /// Fails with [`Error::DuplicateName`] when the name is taken, leaving the
    /// existing registration untouched.
    pub fn register<F, T, E>(&mut self, name: impl Into<String>, mut operation: F) -> Result<()>
    where
        F: FnMut() -> std::result::Result<T, E> + 'static,
        E: Into<OperationError>,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::InvalidName);
        }
        if self.cases.iter().any(|case| case.name == name) {
            return Err(DuplicateNameError { name }.into());
        }

        debug!(case = %name, "registered benchmark case");
        self.cases.push(BenchmarkCase {
            name,
            operation: Box::new(move || -> std::result::Result<(), OperationError> {
                black_box(operation())
                    .map(|value| {
                        black_box(value);
                    })
                    .map_err(Into::into)
            }),
        });
        Ok(())
    }

    /// Registered case names in registration order.
    pub fn case_names(&self) -> impl Iterator<Item = &str> {
        self.cases.iter().map(BenchmarkCase::name)
    }

    /// Number of registered cases.
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    /// Runs every case: `warmup_count` untimed invocations, then
    /// `measured_count` timed ones.
    ///
    /// Case failures do not make this return `Err`; they are recorded in the
    /// [`RunOutcome`] next to the results of the other cases. The only error is
    /// [`Error::InvalidMeasuredCount`] for `measured_count == 0`.
    pub fn run_all(&mut self, warmup_count: usize, measured_count: usize) -> Result<RunOutcome> {
        if measured_count == 0 {
            return Err(Error::InvalidMeasuredCount);
        }

        let total = self.cases.len();
        let started = Instant::now();
        // A deadline past the clock's range never expires.
        let deadline = self
            .timeout
            .and_then(|timeout| started.checked_add(timeout));
        let mut outcome = RunOutcome {
            cases: Vec::with_capacity(total),
            ..RunOutcome::default()
        };

        info!(
            cases = total,
            warmup_count, measured_count, "starting benchmark run"
        );

        for (index, case) in self.cases.iter_mut().enumerate() {
            match Self::run_case(case, warmup_count, measured_count, deadline) {
                CaseRun::Finished(case_outcome) => {
                    let failed = matches!(case_outcome, CaseOutcome::Failed(_));
                    outcome.cases.push(case_outcome);

                    if failed && self.failure_policy == FailurePolicy::Abort {
                        let skipped = total - index - 1;
                        warn!(skipped, "aborting run after failed case");
                        outcome.aborted = skipped > 0;
                        break;
                    }
                }
                CaseRun::DeadlineReached => {
                    warn!(
                        case = %case.name,
                        not_completed = total - index,
                        elapsed = ?started.elapsed(),
                        "run timed out"
                    );
                    outcome.timed_out = true;
                    break;
                }
            }
        }

        info!(
            completed = outcome.results().count(),
            failed = outcome.failures().count(),
            elapsed = ?started.elapsed(),
            "benchmark run finished"
        );
        Ok(outcome)
    }

    fn run_case(
        case: &mut BenchmarkCase,
        warmup_count: usize,
        measured_count: usize,
        deadline: Option<Instant>,
    ) -> CaseRun {
        let expired = || deadline.is_some_and(|d| Instant::now() >= d);
        debug!(case = %case.name, warmup_count, measured_count, "running case");

        for invocation in 0..warmup_count {
            if expired() {
                return CaseRun::DeadlineReached;
            }
            if let Err(source) = (case.operation)() {
                return Self::failed(case, Phase::Warmup, invocation, source);
            }
        }

        let mut samples = Vec::with_capacity(measured_count.min(MAX_PREALLOCATED_SAMPLES));
        for invocation in 0..measured_count {
            if expired() {
                return CaseRun::DeadlineReached;
            }
            let start = Instant::now();
            let outcome = (case.operation)();
            let elapsed = start.elapsed();

            if let Err(source) = outcome {
                return Self::failed(case, Phase::Measurement, invocation, source);
            }
            samples.push(Sample::new(elapsed));
        }

        let result = BenchmarkResult::new(case.name.clone(), samples);
        debug!(
            case = %case.name,
            samples = result.samples().len(),
            mean = result.mean(),
            "case finished"
        );
        CaseRun::Finished(CaseOutcome::Completed(result))
    }

    fn failed(
        case: &BenchmarkCase,
        phase: Phase,
        invocation: usize,
        source: OperationError,
    ) -> CaseRun {
        let error = ExecutionError::new(case.name.clone(), phase, invocation, source);
        warn!(case = %case.name, %phase, invocation, error = %error.source, "case failed");
        CaseRun::Finished(CaseOutcome::Failed(error))
    }
}
