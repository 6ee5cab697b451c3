//! Plain-text report generation.
//!
//! One line per case, in registration order:
//!
//! ```text
//! lambertw: mean=0.000000012s stddev=0.000000003s min=0.000000010s max=0.000000041s n=1000
//! wrightomega: ERROR case 'wrightomega' failed during measurement invocation 4: ...
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Write};

use crate::config::OutputTarget;
use crate::error::{ExecutionError, Result, ResultExt};
use crate::result::BenchmarkResult;
use crate::runner::{CaseOutcome, RunOutcome};

/// Formats the report line of a successful case.
///
/// # Example
///
/// ```
/// use omega_bench::{report, BenchmarkResult, Sample};
/// use std::time::Duration;
///
/// let result = BenchmarkResult::new("lambertw", vec![Sample::new(Duration::from_micros(2))]);
/// assert_eq!(
///     report::format_result(&result),
///     "lambertw: mean=0.000002000s stddev=0.000000000s min=0.000002000s max=0.000002000s n=1"
/// );
/// ```
pub fn format_result(result: &BenchmarkResult) -> String {
    let stats = result.statistics();
    format!(
        "{}: mean={:.9}s stddev={:.9}s min={:.9}s max={:.9}s n={}",
        result.case_name(),
        stats.mean,
        stats.stddev,
        stats.min,
        stats.max,
        stats.count
    )
}

/// Formats the report line of a failed case.
pub fn format_failure(error: &ExecutionError) -> String {
    format!("{}: ERROR {error}", error.case)
}

/// Formats the report line of any case outcome.
pub fn format_outcome(outcome: &CaseOutcome) -> String {
    match outcome {
        CaseOutcome::Completed(result) => format_result(result),
        CaseOutcome::Failed(error) => format_failure(error),
    }
}

/// Writes run outcomes to an output sink.
pub struct Reporter {
    sink: Box<dyn Write>,
}

impl Reporter {
    /// Reporter writing to `sink`.
    pub fn new(sink: Box<dyn Write>) -> Self {
        Self { sink }
    }

    /// Reporter for a configured target; files are created or truncated.
    pub fn from_target(target: &OutputTarget) -> Result<Self> {
        let sink: Box<dyn Write> = match target {
            OutputTarget::Stdout => Box::new(io::stdout().lock()),
            OutputTarget::File(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create report file {}", path.display()))?;
                Box::new(BufWriter::new(file))
            }
        };
        Ok(Self::new(sink))
    }

    /// Writes one line per recorded case and flushes the sink.
    pub fn report(&mut self, outcome: &RunOutcome) -> Result<()> {
        for case in outcome.cases() {
            writeln!(self.sink, "{}", format_outcome(case))?;
        }
        self.sink.flush()?;
        Ok(())
    }
}
