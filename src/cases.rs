//! Built-in special-function cases.
//!
//! Each case evaluates a function from a third-party numeric crate at a fresh
//! input drawn from a [`RandomSource`] per invocation, so the timings cover
//! the whole domain rather than one cached argument.

use std::ops::Range;

use thiserror::Error;

use crate::error::{Error, Result};
use crate::random::{RandomSource, RngSource};
use crate::runner::BenchRunner;

/// Input domain of the built-in cases.
pub const DEFAULT_DOMAIN: Range<f64> = 0.0..100.0;

/// Case name of the Lambert W benchmark.
pub const LAMBERTW: &str = "lambertw";
/// Case name of the Wright omega benchmark.
pub const WRIGHTOMEGA: &str = "wrightomega";

/// Names of the built-in cases, in registration order.
pub const BUILTIN_CASES: [&str; 2] = [LAMBERTW, WRIGHTOMEGA];

/// Raised when a special function produces an unusable value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    /// Result is NaN or infinite
    #[error("{function}({input}) returned non-finite value {value}")]
    NonFinite {
        function: &'static str,
        input: f64,
        value: f64,
    },
}

fn check_finite(
    function: &'static str,
    input: f64,
    value: f64,
) -> std::result::Result<f64, EvalError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(EvalError::NonFinite {
            function,
            input,
            value,
        })
    }
}

/// Principal branch of Lambert W on `f32`, from `fastapprox`.
pub fn lambertw<R: RandomSource>(
    mut source: R,
    domain: Range<f64>,
) -> impl FnMut() -> std::result::Result<f32, EvalError> {
    move || {
        let x = source.uniform(domain.clone()) as f32;
        let w = fastapprox::fast::lambertw(x);
        check_finite(LAMBERTW, f64::from(x), f64::from(w)).map(|_| w)
    }
}

/// Wright omega at a real argument on `f64`.
///
/// For real `x`, ω(x) is the solution of `ω + ln ω = x`, which equals
/// `W₀(eˣ)`; the principal branch comes from the `lambert_w` crate.
pub fn wrightomega<R: RandomSource>(
    mut source: R,
    domain: Range<f64>,
) -> impl FnMut() -> std::result::Result<f64, EvalError> {
    move || {
        let x = source.uniform(domain.clone());
        check_finite(WRIGHTOMEGA, x, lambert_w::lambert_w0(x.exp()))
    }
}

/// Registers the built-in cases on `runner`.
///
/// With an empty `filter` every case in [`BUILTIN_CASES`] is registered,
/// otherwise only the named ones, still in [`BUILTIN_CASES`] order. With a
/// seed, the case at position `i` draws from `seed + i`; without one, every
/// case uses the thread RNG.
pub fn register_builtin(
    runner: &mut BenchRunner,
    seed: Option<u64>,
    filter: &[String],
) -> Result<()> {
    if let Some(unknown) = filter
        .iter()
        .find(|name| !BUILTIN_CASES.contains(&name.as_str()))
    {
        return Err(Error::UnknownCase {
            name: unknown.clone(),
            available: BUILTIN_CASES.join(", "),
        });
    }

    let selected = BUILTIN_CASES
        .iter()
        .enumerate()
        .filter(|(_, name)| filter.is_empty() || filter.iter().any(|f| f == *name));

    for (index, &name) in selected {
        let source: Box<dyn RandomSource> = match seed {
            Some(seed) => Box::new(RngSource::seeded(seed.wrapping_add(index as u64))),
            None => Box::new(RngSource::from_entropy()),
        };

        match name {
            LAMBERTW => runner.register(name, lambertw(source, DEFAULT_DOMAIN))?,
            _ => runner.register(name, wrightomega(source, DEFAULT_DOMAIN))?,
        }
    }
    Ok(())
}
