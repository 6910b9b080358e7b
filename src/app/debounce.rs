use std::time::{Duration, Instant};

/// Holds back a changing value until it has been left alone for a quiet period.
///
/// Only the last input is kept; intermediate values are never emitted.
#[derive(Debug)]
pub struct Debouncer<T> {
    settled: T,
    pending: Option<(T, Instant)>,
    quiet: Duration,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, quiet: Duration) -> Self {
        Self {
            settled: initial,
            pending: None,
            quiet,
        }
    }

    /// Records a new value and restarts the quiet period at `now`.
    pub fn input(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Settles the pending value once the quiet period has elapsed.
    ///
    /// Returns the value only when it differs from the previously settled one.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let since = self.pending.as_ref().map(|(_, since)| *since)?;
        if now.saturating_duration_since(since) < self.quiet {
            return None;
        }

        let (value, _) = self.pending.take()?;
        if value == self.settled {
            return None;
        }

        self.settled = value.clone();
        Some(value)
    }

    pub fn settled(&self) -> &T {
        &self.settled
    }
}
