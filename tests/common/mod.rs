//! Shared helpers for integration tests.

#![allow(dead_code)]

use omega_bench::RandomSource;
use std::cell::RefCell;
use std::ops::Range;
use std::rc::Rc;
use std::time::Duration;

/// Deterministic [`RandomSource`] that replays scripted values and records
/// every range it was asked for.
#[derive(Clone, Default)]
pub struct ScriptedSource {
    values: Rc<Vec<f64>>,
    cursor: Rc<RefCell<usize>>,
    requested: Rc<RefCell<Vec<Range<f64>>>>,
}

impl ScriptedSource {
    /// Source cycling through `values`.
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: Rc::new(values.to_vec()),
            ..Self::default()
        }
    }

    /// Number of values drawn so far.
    pub fn draws(&self) -> usize {
        *self.cursor.borrow()
    }

    /// Ranges passed to `uniform`, in call order.
    pub fn requested(&self) -> Vec<Range<f64>> {
        self.requested.borrow().clone()
    }
}

impl RandomSource for ScriptedSource {
    fn uniform(&mut self, range: Range<f64>) -> f64 {
        let mut cursor = self.cursor.borrow_mut();
        let value = self.values[*cursor % self.values.len()];
        *cursor += 1;
        self.requested.borrow_mut().push(range);
        value
    }
}

/// Operation that busy-waits for `duration`, so its samples are strictly positive.
pub fn spin_for(duration: Duration) -> impl FnMut() -> Result<(), String> {
    move || {
        let start = std::time::Instant::now();
        while start.elapsed() < duration {
            std::hint::spin_loop();
        }
        Ok(())
    }
}

/// Operation that fails on every call.
pub fn always_fail(message: &'static str) -> impl FnMut() -> Result<(), String> {
    move || Err(message.to_string())
}
