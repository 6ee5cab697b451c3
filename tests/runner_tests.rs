//! Behavioural tests for the benchmark runner
//!
//! Covers ordering, sample counts, failure isolation, repeated runs and the
//! injected input source, through the public API only.

use omega_bench::cases::{self, DEFAULT_DOMAIN};
use omega_bench::{
    report, BenchRunner, CaseOutcome, DuplicateNameError, Error, FailurePolicy, Phase,
};
use std::time::Duration;

mod common;
use common::{always_fail, spin_for, ScriptedSource};

/// **What is tested:** One result per case in registration order
/// **Why it is tested:** Reports are read top to bottom and must mirror registration
/// **Test conditions:** Registers c, a, b (non-alphabetical) and runs 3 iterations
/// **Expectations:** Results come back as c, a, b with 3 samples each
#[test]
fn test_results_follow_registration_order() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = BenchRunner::new();
    for name in ["c", "a", "b"] {
        runner.register(name, move || Ok::<_, String>(name.len()))?;
    }

    let outcome = runner.run_all(1, 3)?;
    let names: Vec<&str> = outcome.results().map(|r| r.case_name()).collect();

    assert_eq!(names, ["c", "a", "b"]);
    assert!(outcome.results().all(|r| r.samples().len() == 3));
    Ok(())
}

/// **What is tested:** Exact sample counts for several N
/// **Why it is tested:** measured_count = N must yield exactly N samples
/// **Test conditions:** Runs the same runner with N in 1, 2, 17, 100
/// **Expectations:** Every result has exactly N samples
#[test]
fn test_measured_count_yields_exact_samples() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = BenchRunner::new();
    runner.register("noop", || Ok::<_, String>(()))?;

    for n in [1, 2, 17, 100] {
        let outcome = runner.run_all(0, n)?;
        let result = outcome.results().next().ok_or("missing result")?;
        assert_eq!(result.samples().len(), n);
        assert_eq!(result.statistics().count, n);
    }
    Ok(())
}

/// **What is tested:** Duplicate registration leaves the original case in place
/// **Why it is tested:** A failing register call must not replace or remove state
/// **Test conditions:** Registers a succeeding "x", then a failing "x"
/// **Expectations:** DuplicateName error; the run still succeeds using the original
#[test]
fn test_duplicate_registration_keeps_original() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = BenchRunner::new();
    runner.register("x", || Ok::<_, String>(1))?;

    let err = runner.register("x", always_fail("replacement")).unwrap_err();
    assert!(matches!(
        err,
        Error::DuplicateName(DuplicateNameError { ref name }) if name == "x"
    ));

    let outcome = runner.run_all(0, 2)?;
    assert!(outcome.is_success());
    assert_eq!(runner.len(), 1);
    Ok(())
}

/// **What is tested:** Failure isolation between cases
/// **Why it is tested:** One failing function must not discard timings of the others
/// **Test conditions:** A always succeeds, B always fails, C always succeeds
/// **Expectations:** A and C have results, B has an ExecutionError marker, run is failed
#[test]
fn test_failure_isolation() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = BenchRunner::new();
    runner.register("A", || Ok::<_, String>(()))?;
    runner.register("B", always_fail("numerically unstable"))?;
    runner.register("C", || Ok::<_, String>(()))?;

    let outcome = runner.run_all(2, 4)?;

    assert_eq!(outcome.cases().len(), 3);
    assert!(matches!(outcome.cases()[0], CaseOutcome::Completed(_)));
    match &outcome.cases()[1] {
        CaseOutcome::Failed(error) => {
            assert_eq!(error.case, "B");
            assert_eq!(error.phase, Phase::Warmup);
            assert_eq!(error.invocation, 0);
            assert!(error.to_string().contains("numerically unstable"));
        }
        other => panic!("Expected failure for B, got {other:?}"),
    }
    assert!(matches!(outcome.cases()[2], CaseOutcome::Completed(_)));
    assert!(!outcome.is_success());
    assert!(!outcome.aborted());

    let lines: Vec<String> = outcome.cases().iter().map(report::format_outcome).collect();
    assert!(lines[1].starts_with("B: ERROR "));
    Ok(())
}

/// **What is tested:** Abort policy stops after the first failure
/// **Why it is tested:** The failure policy is configurable per runner
/// **Test conditions:** A succeeds, B fails, C succeeds; policy Abort
/// **Expectations:** A and B recorded, C absent, outcome aborted
#[test]
fn test_abort_policy_skips_remaining() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = BenchRunner::new().with_failure_policy(FailurePolicy::Abort);
    runner.register("A", || Ok::<_, String>(()))?;
    runner.register("B", always_fail("boom"))?;
    runner.register("C", || Ok::<_, String>(()))?;

    let outcome = runner.run_all(0, 2)?;

    let names: Vec<&str> = outcome.cases().iter().map(CaseOutcome::case_name).collect();
    assert_eq!(names, ["A", "B"]);
    assert!(outcome.aborted());
    assert!(!outcome.is_success());
    Ok(())
}

/// **What is tested:** Repeated runs have the same shape
/// **Why it is tested:** Running twice must give the same cases and sample counts
/// **Test conditions:** Two seeded built-in cases, run twice with warmup 2, measured 10
/// **Expectations:** Same case names and sample counts in both outcomes
#[test]
fn test_repeated_runs_same_shape() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = BenchRunner::new();
    cases::register_builtin(&mut runner, Some(5), &[])?;

    let first = runner.run_all(2, 10)?;
    let second = runner.run_all(2, 10)?;

    let shape = |outcome: &omega_bench::RunOutcome| -> Vec<(String, usize)> {
        outcome
            .results()
            .map(|r| (r.case_name().to_string(), r.samples().len()))
            .collect()
    };
    assert_eq!(shape(&first), shape(&second));
    assert_eq!(shape(&first).len(), 2);
    Ok(())
}

/// **What is tested:** Lambert W example scenario
/// **Why it is tested:** Reference scenario: warmup 1, measured 5 over [0, 100)
/// **Test conditions:** Seeded lambertw case
/// **Expectations:** 5 samples, mean > 0 within [min, max], report line ends with n=5
#[test]
fn test_lambertw_scenario() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = BenchRunner::new();
    cases::register_builtin(&mut runner, Some(1), &["lambertw".to_string()])?;

    let outcome = runner.run_all(1, 5)?;
    let result = outcome.results().next().ok_or("missing lambertw result")?;

    assert_eq!(result.samples().len(), 5);
    assert!(result.statistics().min >= 0.0);
    assert!(result.mean() > 0.0);
    assert!(result.mean() >= result.statistics().min);
    assert!(result.mean() <= result.statistics().max);

    let line = report::format_result(result);
    assert!(line.starts_with("lambertw: mean="), "{line}");
    assert!(line.ends_with(" n=5"), "{line}");
    Ok(())
}

/// **What is tested:** Positive timings for a workload of known cost
/// **Why it is tested:** The monotonic clock must capture the invocation's duration
/// **Test conditions:** Operation spins for 50µs; measured 5
/// **Expectations:** mean > 0 and every sample at least 50µs
#[test]
fn test_samples_capture_elapsed_time() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = BenchRunner::new();
    runner.register("spin", spin_for(Duration::from_micros(50)))?;

    let outcome = runner.run_all(1, 5)?;
    let result = outcome.results().next().ok_or("missing result")?;

    assert!(result.mean() > 0.0);
    assert!(result
        .samples()
        .iter()
        .all(|s| s.duration() >= Duration::from_micros(50)));
    Ok(())
}

/// **What is tested:** Inputs come from the injected source, one per invocation
/// **Why it is tested:** Tests must be able to substitute and observe the input sequence
/// **Test conditions:** Scripted source feeding the wrightomega case; warmup 2, measured 3
/// **Expectations:** Five draws, all requesting the default domain
#[test]
fn test_injected_source_drives_inputs() -> Result<(), Box<dyn std::error::Error>> {
    let source = ScriptedSource::new(&[0.0, 1.0, 50.0]);
    let mut runner = BenchRunner::new();
    runner.register(
        "wrightomega",
        cases::wrightomega(source.clone(), DEFAULT_DOMAIN),
    )?;

    let outcome = runner.run_all(2, 3)?;

    assert!(outcome.is_success());
    assert_eq!(source.draws(), 5);
    assert!(source.requested().iter().all(|r| *r == DEFAULT_DOMAIN));
    Ok(())
}

/// **What is tested:** Non-finite function values fail the case
/// **Why it is tested:** Unstable inputs are reported as errors, not as timings
/// **Test conditions:** Scripted NaN input fed to wrightomega during measurement
/// **Expectations:** Failed outcome in the measurement phase
#[test]
fn test_non_finite_value_fails_case() -> Result<(), Box<dyn std::error::Error>> {
    let source = ScriptedSource::new(&[1.0, f64::NAN]);
    let mut runner = BenchRunner::new();
    runner.register("wrightomega", cases::wrightomega(source, DEFAULT_DOMAIN))?;

    let outcome = runner.run_all(1, 4)?;
    let error = outcome.failures().next().ok_or("expected a failure")?;

    assert_eq!(error.phase, Phase::Measurement);
    assert_eq!(error.invocation, 0);
    assert!(error.to_string().contains("non-finite"));
    Ok(())
}

/// **What is tested:** Overall timeout leaves unfinished cases out
/// **Why it is tested:** Cases not completed before the deadline must be absent
/// **Test conditions:** 30ms timeout; fast case, then a case needing ~100 × 2ms
/// **Expectations:** Only the fast case is recorded and the run is marked timed out
#[test]
fn test_timeout_keeps_completed_cases_only() -> Result<(), Box<dyn std::error::Error>> {
    let mut runner = BenchRunner::new().with_timeout(Duration::from_millis(30));
    runner.register("fast", || Ok::<_, String>(()))?;
    runner.register("slow", spin_for(Duration::from_millis(2)))?;

    let outcome = runner.run_all(0, 100)?;

    let names: Vec<&str> = outcome.cases().iter().map(CaseOutcome::case_name).collect();
    assert_eq!(names, ["fast"]);
    assert!(outcome.timed_out());
    assert!(!outcome.is_success());
    Ok(())
}
