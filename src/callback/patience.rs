//! Consecutive non-improvement counting

/// Counts consecutive non-improving epochs against a limit
///
/// Triggering does not reset the counter; callers that keep going after a
/// trigger (plateau-style schedules) call [`Patience::reset`] themselves.
#[derive(Clone, Copy, Debug)]
pub struct Patience {
    wait: usize,
    limit: usize,
}

impl Patience {
    /// Tolerate up to `limit` consecutive non-improving epochs
    pub fn new(limit: usize) -> Self {
        Self { wait: 0, limit }
    }

    /// Record one epoch's outcome; returns true when patience runs out
    ///
    /// An improvement resets the wait count and never triggers.
    pub fn record(&mut self, improved: bool) -> bool {
        if improved {
            self.wait = 0;
            return false;
        }
        self.wait += 1;
        self.wait >= self.limit
    }

    /// Start a fresh non-improvement streak
    pub fn reset(&mut self) {
        self.wait = 0;
    }

    /// Epochs waited since the last improvement
    pub fn wait(&self) -> usize {
        self.wait
    }

    /// Configured limit
    pub fn limit(&self) -> usize {
        self.limit
    }
}
