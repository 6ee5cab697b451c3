//! Benchmark result types.

use std::time::Duration;

/// One measured invocation.
///
/// Backed by a [`Duration`], so a sample can never be negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Sample(Duration);

impl Sample {
    /// Creates a sample from an elapsed duration.
    pub const fn new(elapsed: Duration) -> Self {
        Self(elapsed)
    }

    /// Elapsed wall-clock time.
    pub const fn duration(&self) -> Duration {
        self.0
    }

    /// Elapsed time in seconds.
    pub fn as_secs_f64(&self) -> f64 {
        self.0.as_secs_f64()
    }
}

impl From<Duration> for Sample {
    fn from(elapsed: Duration) -> Self {
        Self(elapsed)
    }
}

/// Aggregate timing statistics, all in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Statistics {
    /// Arithmetic mean.
    pub mean: f64,
    /// Sample standard deviation (n - 1 denominator), zero for a single sample.
    pub stddev: f64,
    /// Fastest sample.
    pub min: f64,
    /// Slowest sample.
    pub max: f64,
    /// Number of samples.
    pub count: usize,
}

impl Statistics {
    /// Computes statistics over `samples`.
    ///
    /// An empty slice yields all-zero statistics with `count == 0`.
    ///
    /// # Example
    ///
    /// ```
    /// use omega_bench::{Sample, Statistics};
    /// use std::time::Duration;
    ///
    /// let samples = [
    ///     Sample::new(Duration::from_millis(1)),
    ///     Sample::new(Duration::from_millis(3)),
    /// ];
    /// let stats = Statistics::from_samples(&samples);
    ///
    /// assert!((stats.mean - 0.002).abs() < 1e-12);
    /// assert_eq!(stats.count, 2);
    /// ```
    pub fn from_samples(samples: &[Sample]) -> Self {
        let count = samples.len();
        if count == 0 {
            return Self {
                mean: 0.0,
                stddev: 0.0,
                min: 0.0,
                max: 0.0,
                count,
            };
        }

        let secs = samples.iter().map(Sample::as_secs_f64);
        let (min, max, sum) = secs.fold(
            (f64::INFINITY, f64::NEG_INFINITY, 0.0),
            |(min, max, sum), s| (min.min(s), max.max(s), sum + s),
        );
        let mean = sum / count as f64;

        let stddev = if count > 1 {
            let squares: f64 = samples
                .iter()
                .map(|s| (s.as_secs_f64() - mean).powi(2))
                .sum();
            (squares / (count - 1) as f64).sqrt()
        } else {
            0.0
        };

        Self {
            // Rounding in the sum can push the mean a hair outside [min, max].
            mean: mean.clamp(min, max),
            stddev,
            min,
            max,
            count,
        }
    }
}

/// Samples and statistics for one benchmark case.
///
/// Statistics are computed once from the samples at construction; there is no
/// way to change either afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct BenchmarkResult {
    case_name: String,
    samples: Vec<Sample>,
    statistics: Statistics,
}

impl BenchmarkResult {
    /// Creates a result from the measured samples of a case.
    pub fn new(case_name: impl Into<String>, samples: Vec<Sample>) -> Self {
        let statistics = Statistics::from_samples(&samples);
        Self {
            case_name: case_name.into(),
            samples,
            statistics,
        }
    }

    /// Name of the case.
    pub fn case_name(&self) -> &str {
        &self.case_name
    }

    /// Samples in measurement order.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    /// Derived statistics.
    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    /// Mean time per invocation in seconds.
    pub fn mean(&self) -> f64 {
        self.statistics.mean
    }
}
