//! Best-value tracking over a monitored metric
//!
//! `Tracker` is the shared core of the early-stopping, checkpoint and
//! plateau callbacks: it binds a monitor name to a recorder column at fit
//! begin, then folds each epoch's value into a running best.

use super::compare::{Comparator, Direction};
use crate::error::{Error, Result};
use crate::record::MetricLog;

/// Running best of one monitored metric
///
/// The monitor must name one of the recorder's evaluation metrics; binding
/// happens in [`Tracker::begin_fit`] and fails fast when the name is absent.
#[derive(Clone, Debug)]
pub struct Tracker {
    monitor: String,
    comparator: Comparator,
    best: f64,
    new_best: bool,
    column: Option<usize>,
}

impl Tracker {
    /// Track `monitor` with the direction inferred from its name and no
    /// improvement margin
    pub fn new(monitor: impl Into<String>) -> Self {
        let monitor = monitor.into();
        let comparator = Comparator::for_monitor(&monitor, 0.0);
        Self {
            monitor,
            comparator,
            best: comparator.worst(),
            new_best: false,
            column: None,
        }
    }

    /// Require improvements to clear `min_delta`
    pub fn min_delta(mut self, min_delta: f64) -> Self {
        self.comparator = Comparator::new(self.comparator.direction(), min_delta);
        self.best = self.comparator.worst();
        self
    }

    /// Override the direction inferred from the monitor name
    pub fn direction(mut self, direction: Direction) -> Self {
        self.comparator = Comparator::new(direction, self.comparator.min_delta());
        self.best = self.comparator.worst();
        self
    }

    /// Bind the monitor to its recorder column and reset the running best
    ///
    /// Fails with [`Error::MonitorNotFound`] when the recorder does not carry
    /// the monitored name among its evaluation metrics.
    pub fn begin_fit(&mut self, metrics: &MetricLog) -> Result<()> {
        let column = metrics.monitor_index(&self.monitor).ok_or_else(|| {
            Error::MonitorNotFound {
                monitor: self.monitor.clone(),
                available: metrics.names()[1..].to_vec(),
            }
        })?;
        self.column = Some(column);
        self.best = self.comparator.worst();
        self.new_best = false;
        Ok(())
    }

    /// Fold `value` into the running best; returns true on a new best
    pub fn update(&mut self, value: f64) -> bool {
        self.new_best = self.comparator.improved(value, self.best);
        if self.new_best {
            self.best = value;
        }
        self.new_best
    }

    /// Read the monitored value of the latest epoch and fold it in
    ///
    /// Returns the value, or `None` when no epoch has been recorded yet or
    /// the monitor is not bound to a column.
    pub fn observe(&mut self, metrics: &MetricLog) -> Option<f64> {
        let value = metrics.last_row()?.get(self.column?).copied()?;
        self.update(value);
        Some(value)
    }

    /// Best value seen since fit begin
    pub fn best(&self) -> f64 {
        self.best
    }

    /// Whether the most recent update set a new best
    pub fn new_best(&self) -> bool {
        self.new_best
    }

    /// Name of the monitored metric
    pub fn monitor(&self) -> &str {
        &self.monitor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recorded(values: &[(f64, f64)]) -> MetricLog {
        let mut log = MetricLog::new(["valid_loss", "accuracy"]);
        for &(loss, acc) in values {
            log.push_epoch(0.5, &[loss, acc]).unwrap();
        }
        log
    }

    #[test]
    fn test_begin_fit_binds_monitor_column() {
        let log = recorded(&[(0.9, 0.6)]);
        let mut tracker = Tracker::new("accuracy");
        tracker.begin_fit(&log).unwrap();
        assert_eq!(tracker.observe(&log), Some(0.6));
    }

    #[test]
    fn test_begin_fit_rejects_unknown_monitor() {
        let log = recorded(&[]);
        let mut tracker = Tracker::new("f1");
        let err = tracker.begin_fit(&log).unwrap_err();
        match err {
            Error::MonitorNotFound { monitor, available } => {
                assert_eq!(monitor, "f1");
                assert_eq!(available, vec!["valid_loss", "accuracy"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_begin_fit_resets_best() {
        let log = recorded(&[(0.5, 0.9)]);
        let mut tracker = Tracker::new("valid_loss");
        tracker.begin_fit(&log).unwrap();
        tracker.observe(&log);
        assert_eq!(tracker.best(), 0.5);

        tracker.begin_fit(&log).unwrap();
        assert_eq!(tracker.best(), f64::INFINITY);
        assert!(!tracker.new_best());
    }

    #[test]
    fn test_strictly_improving_sequence_always_new_best() {
        let mut tracker = Tracker::new("valid_loss");
        for value in [1.0, 0.8, 0.5, 0.2] {
            assert!(tracker.update(value));
        }
        assert_eq!(tracker.best(), 0.2);
    }

    #[test]
    fn test_non_improving_values_leave_best_unchanged() {
        let mut tracker = Tracker::new("valid_loss");
        assert!(tracker.update(0.5));
        assert!(!tracker.update(0.5));
        assert!(!tracker.update(0.7));
        assert_eq!(tracker.best(), 0.5);
        assert!(!tracker.new_best());
    }

    #[test]
    fn test_min_delta_filters_marginal_improvement() {
        let mut tracker = Tracker::new("valid_loss").min_delta(0.1);
        assert!(tracker.update(1.0));
        // 0.95 undercuts 1.0 but not by more than the margin
        assert!(!tracker.update(0.95));
        assert!(tracker.update(0.85));
        assert_eq!(tracker.best(), 0.85);
    }

    #[test]
    fn test_accuracy_monitor_maximizes() {
        let log = recorded(&[(0.9, 0.6)]);
        let mut tracker = Tracker::new("accuracy");
        tracker.begin_fit(&log).unwrap();
        assert!(tracker.update(0.6));
        assert!(tracker.update(0.7));
        assert!(!tracker.update(0.65));
        assert_eq!(tracker.best(), 0.7);
    }

    #[test]
    fn test_direction_override() {
        // "score" would maximize by name; force minimization
        let mut tracker = Tracker::new("score").direction(Direction::Min);
        assert!(tracker.update(5.0));
        assert!(tracker.update(3.0));
        assert!(!tracker.update(4.0));
        assert_eq!(tracker.best(), 3.0);
    }

    #[test]
    fn test_observe_before_binding_is_none() {
        let log = recorded(&[(0.9, 0.6)]);
        let mut tracker = Tracker::new("valid_loss");
        // No begin_fit yet, so there is no column to read
        assert_eq!(tracker.observe(&log), None);
        assert_eq!(tracker.best(), f64::INFINITY);
    }

    #[test]
    fn test_observe_without_epochs() {
        let log = recorded(&[]);
        let mut tracker = Tracker::new("valid_loss");
        tracker.begin_fit(&log).unwrap();
        assert_eq!(tracker.observe(&log), None);
        assert!(!tracker.new_best());
    }

    #[test]
    fn test_observe_reads_latest_epoch() {
        let log = recorded(&[(1.0, 0.5), (0.8, 0.6), (0.9, 0.7)]);
        let mut tracker = Tracker::new("valid_loss");
        tracker.begin_fit(&log).unwrap();
        assert_eq!(tracker.observe(&log), Some(0.9));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The running best of a loss monitor never increases
        #[test]
        fn min_best_is_monotone(values in prop::collection::vec(-100.0f64..100.0, 1..50)) {
            let mut tracker = Tracker::new("valid_loss");
            let mut previous = tracker.best();
            for value in values {
                tracker.update(value);
                prop_assert!(tracker.best() <= previous);
                previous = tracker.best();
            }
        }

        /// A new best always equals the value that set it
        #[test]
        fn new_best_records_the_value(values in prop::collection::vec(-100.0f64..100.0, 1..50)) {
            let mut tracker = Tracker::new("accuracy");
            for value in values {
                if tracker.update(value) {
                    prop_assert_eq!(tracker.best(), value);
                }
            }
        }
    }
}
