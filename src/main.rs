//! CLI entry point for omega-bench
//!
//! Times the built-in special-function cases and writes one report line per
//! case to stdout or a file.

use anyhow::Context;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use omega_bench::cases::{self, BUILTIN_CASES};
use omega_bench::config::CliArgs;
use omega_bench::{AppConfig, BenchRunner, ConfigError, Reporter};

/// Micro-benchmark harness for numeric special functions
#[derive(Parser)]
#[command(name = "omega-bench")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the benchmark cases and write the report
    Run(RunArgs),
    /// List the built-in benchmark cases
    List,
}

#[derive(Args)]
struct RunArgs {
    /// Unmeasured invocations per case [env: OMEGA_BENCH_WARMUP, default: 10]
    #[arg(short, long, value_name = "N")]
    warmup: Option<usize>,

    /// Measured invocations per case [env: OMEGA_BENCH_ITERATIONS, default: 1000]
    #[arg(short = 'n', long, value_name = "N")]
    iterations: Option<usize>,

    /// Report destination: a file path, 'stdout' or '-' [env: OMEGA_BENCH_OUTPUT]
    #[arg(short, long, value_name = "PATH")]
    output: Option<String>,

    /// Seed for reproducible inputs [env: OMEGA_BENCH_SEED]
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Abort the whole run after this many seconds [env: OMEGA_BENCH_TIMEOUT]
    #[arg(long, value_name = "SECONDS")]
    timeout: Option<f64>,

    /// Stop after the first failing case instead of running the rest
    #[arg(long)]
    fail_fast: bool,

    /// Only run the named case (repeatable)
    #[arg(long = "case", value_name = "NAME")]
    cases: Vec<String>,
}

/// Convert CLI args to CliArgs struct for AppConfig
impl From<RunArgs> for CliArgs {
    fn from(args: RunArgs) -> Self {
        Self {
            warmup: args.warmup,
            iterations: args.iterations,
            output: args.output,
            seed: args.seed,
            timeout: args.timeout,
            fail_fast: args.fail_fast,
            cases: args.cases,
        }
    }
}

/// Install a stderr subscriber; RUST_LOG wins over the -v count
fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Handle configuration errors with user-friendly messages
fn handle_config_error(error: ConfigError) -> ! {
    let error_message = match &error {
        ConfigError::InvalidCliArgument { .. } => "Invalid CLI argument",
        ConfigError::InvalidEnvValue { .. } => "Invalid environment value",
        ConfigError::Env(_) => "Environment error",
    };

    eprintln!("{error_message}: {error}");
    std::process::exit(2);
}

/// Run the configured built-in cases; `Ok(false)` when any case failed or the run timed out
fn run(config: &AppConfig) -> anyhow::Result<bool> {
    let mut runner = BenchRunner::new().with_failure_policy(config.failure_policy());
    if let Some(timeout) = config.timeout() {
        runner = runner.with_timeout(timeout);
    }
    cases::register_builtin(&mut runner, config.seed(), config.cases())
        .context("Failed to register benchmark cases")?;

    execute(runner, config)
}

/// Run an already populated runner and write its report
fn execute(mut runner: BenchRunner, config: &AppConfig) -> anyhow::Result<bool> {
    info!(
        cases = runner.len(),
        warmup = config.warmup(),
        iterations = config.iterations(),
        output = %config.output(),
        "running benchmarks"
    );
    let mut reporter = Reporter::from_target(config.output())?;
    let outcome = runner.run_all(config.warmup(), config.iterations())?;

    reporter
        .report(&outcome)
        .with_context(|| format!("Failed to write report to {}", config.output()))?;

    for failure in outcome.failures() {
        warn!(case = %failure.case, "{failure}");
    }
    if outcome.timed_out() {
        eprintln!(
            "Run timed out: {} of {} case(s) completed",
            outcome.cases().len(),
            runner.len()
        );
    }
    Ok(outcome.is_success())
}

/// Process exit status of a run: 0 success, 1 failed or timed out, 2 error
fn exit_status(result: &anyhow::Result<bool>) -> u8 {
    match result {
        Ok(true) => 0,
        Ok(false) => 1,
        Err(_) => 2,
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::List => {
            for name in BUILTIN_CASES {
                println!("{name}");
            }
            ExitCode::SUCCESS
        }
        Command::Run(args) => {
            let config = args
                .pipe(CliArgs::from)
                .pipe(AppConfig::from_cli)
                .unwrap_or_else(|error| handle_config_error(error));

            let result = run(&config);
            if let Err(error) = &result {
                eprintln!("Error: {error:#}");
            }
            ExitCode::from(exit_status(&result))
        }
    }
}

/// Helper trait for functional pipeline composition
trait Pipe<T> {
    fn pipe<U, F>(self, f: F) -> U
    where
        F: FnOnce(Self) -> U,
        Self: Sized;
}

impl<T> Pipe<T> for T {
    fn pipe<U, F>(self, f: F) -> U
    where
        F: FnOnce(Self) -> U,
    {
        f(self)
    }
}
