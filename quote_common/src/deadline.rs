//! Deadline budgets for the suspending steps of the pipeline.
//!
//! A `Deadline` is started right before a bounded step and tracks how much of its
//! budget is left. [`Deadline::run`] races the step against the remaining budget with
//! `tokio::time::timeout`; when the budget is exhausted the step's future is dropped,
//! which aborts whatever socket or database I/O it had in flight.
//!
//! Time is measured with `std::time::Instant`, which is monotonic.
use std::future::Future;
use std::time::{Duration, Instant};

use log::warn;

use crate::error::QuoteError;
use crate::result::Result;

/// A started, fixed-duration budget for one named step.
#[derive(Debug, Clone, Copy)]
pub struct Deadline {
    stage: &'static str,
    budget: Duration,
    started: Instant,
}

impl Deadline {
    /// Start measuring `budget` from now.
    pub fn start(stage: &'static str, budget: Duration) -> Self {
        Self {
            stage,
            budget,
            started: Instant::now(),
        }
    }

    /// Name of the bounded step, used in logs and errors.
    pub fn stage(&self) -> &'static str {
        self.stage
    }

    /// Full budget this deadline was started with.
    pub fn budget(&self) -> Duration {
        self.budget
    }

    /// Time spent since the deadline started.
    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Budget left, saturating at zero.
    pub fn remaining(&self) -> Duration {
        self.budget().saturating_sub(self.elapsed())
    }

    /// Returns `true` once the whole budget has been spent.
    pub fn expired(&self) -> bool {
        self.elapsed() >= self.budget()
    }

    /// The error reported when this deadline fires.
    pub fn timeout_error(&self) -> QuoteError {
        QuoteError::Timeout {
            stage: self.stage(),
            budget: self.budget(),
        }
    }

    /// Drive `step` until it finishes or the remaining budget runs out.
    ///
    /// On expiry `step` is dropped before this returns, so it cannot complete later.
    pub async fn run<F, T>(&self, step: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match tokio::time::timeout(self.remaining(), step).await {
            Ok(outcome) => outcome,
            Err(_) => Err(self.timeout_error()),
        }
    }

    /// Log a timeout notice if the budget has been spent.
    ///
    /// Monitoring hook only; it never changes the outcome of the step.
    pub fn report(&self) {
        if self.expired() {
            warn!(
                "{} timeout: {}ms budget spent ({}ms elapsed)",
                self.stage(),
                self.budget().as_millis(),
                self.elapsed().as_millis()
            );
        }
    }
}
