//! Improvement comparison shared by all tracking callbacks

/// Direction a monitored metric should move in
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Lower values are better (losses)
    Min,
    /// Higher values are better (accuracies, scores)
    Max,
}

impl Direction {
    /// Infer the direction from a metric name
    ///
    /// Names containing the substring `"loss"` (case-sensitive) minimize;
    /// everything else maximizes. Callers wanting a different direction pass
    /// one explicitly instead of relying on the heuristic.
    pub fn for_monitor(monitor: &str) -> Self {
        if monitor.contains("loss") {
            Direction::Min
        } else {
            Direction::Max
        }
    }

    /// Starting point no real metric value can fail to improve on
    pub fn worst(self) -> f64 {
        match self {
            Direction::Min => f64::INFINITY,
            Direction::Max => f64::NEG_INFINITY,
        }
    }
}

/// Decides whether a candidate value beats the best seen so far
///
/// `min_delta` is the margin a candidate must clear beyond the current best
/// to count as improvement. The margin is stored negated for [`Direction::Min`]
/// so both directions reduce to one shifted comparison.
#[derive(Clone, Copy, Debug)]
pub struct Comparator {
    direction: Direction,
    margin: f64,
}

impl Comparator {
    /// Build a comparator for `direction` with improvement margin `min_delta`
    pub fn new(direction: Direction, min_delta: f64) -> Self {
        let margin = match direction {
            Direction::Min => -min_delta,
            Direction::Max => min_delta,
        };
        Self { direction, margin }
    }

    /// Comparator with the direction inferred from the monitor name
    pub fn for_monitor(monitor: &str, min_delta: f64) -> Self {
        Self::new(Direction::for_monitor(monitor), min_delta)
    }

    /// True iff `candidate` improves on `best` by more than the margin
    ///
    /// NaN candidates never count as improvement.
    pub fn improved(&self, candidate: f64, best: f64) -> bool {
        let shifted = candidate - self.margin;
        match self.direction {
            Direction::Min => shifted < best,
            Direction::Max => shifted > best,
        }
    }

    /// Direction this comparator optimizes in
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Margin as originally given, before direction normalization
    pub fn min_delta(&self) -> f64 {
        match self.direction {
            Direction::Min => -self.margin,
            Direction::Max => self.margin,
        }
    }

    /// Initial best value for this comparator's direction
    pub fn worst(&self) -> f64 {
        self.direction.worst()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_for_monitor() {
        assert_eq!(Direction::for_monitor("valid_loss"), Direction::Min);
        assert_eq!(Direction::for_monitor("train_loss"), Direction::Min);
        assert_eq!(Direction::for_monitor("focal_loss_weighted"), Direction::Min);
        assert_eq!(Direction::for_monitor("accuracy"), Direction::Max);
        assert_eq!(Direction::for_monitor("f1"), Direction::Max);
        // Substring match is case-sensitive and literal
        assert_eq!(Direction::for_monitor("Loss"), Direction::Max);
        assert_eq!(Direction::for_monitor("error_rate"), Direction::Max);
    }

    #[test]
    fn test_direction_worst() {
        assert_eq!(Direction::Min.worst(), f64::INFINITY);
        assert_eq!(Direction::Max.worst(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_min_improvement_without_margin() {
        let cmp = Comparator::new(Direction::Min, 0.0);
        assert!(cmp.improved(0.5, 1.0));
        assert!(!cmp.improved(1.0, 1.0));
        assert!(!cmp.improved(1.5, 1.0));
        assert!(cmp.improved(0.5, f64::INFINITY));
    }

    #[test]
    fn test_max_improvement_without_margin() {
        let cmp = Comparator::new(Direction::Max, 0.0);
        assert!(cmp.improved(0.9, 0.8));
        assert!(!cmp.improved(0.8, 0.8));
        assert!(!cmp.improved(0.7, 0.8));
        assert!(cmp.improved(0.1, f64::NEG_INFINITY));
    }

    #[test]
    fn test_min_margin_requires_clear_drop() {
        let cmp = Comparator::new(Direction::Min, 0.1);
        // candidate must undercut best by more than the margin
        assert!(cmp.improved(0.85, 1.0));
        assert!(!cmp.improved(0.95, 1.0));
        assert!(!cmp.improved(0.90, 1.0));
    }

    #[test]
    fn test_max_margin_requires_clear_rise() {
        let cmp = Comparator::new(Direction::Max, 0.1);
        assert!(cmp.improved(1.15, 1.0));
        assert!(!cmp.improved(1.05, 1.0));
        assert!(!cmp.improved(1.10, 1.0));
    }

    #[test]
    fn test_nan_never_improves() {
        let min = Comparator::new(Direction::Min, 0.0);
        let max = Comparator::new(Direction::Max, 0.0);
        assert!(!min.improved(f64::NAN, 1.0));
        assert!(!max.improved(f64::NAN, 1.0));
        assert!(!min.improved(f64::NAN, f64::INFINITY));
    }

    #[test]
    fn test_for_monitor_constructor() {
        let cmp = Comparator::for_monitor("valid_loss", 0.0);
        assert_eq!(cmp.direction(), Direction::Min);
        assert_eq!(cmp.worst(), f64::INFINITY);

        let cmp = Comparator::for_monitor("accuracy", 0.0);
        assert_eq!(cmp.direction(), Direction::Max);
        assert_eq!(cmp.worst(), f64::NEG_INFINITY);
    }

    #[test]
    fn test_min_delta_round_trips_through_normalization() {
        let cmp = Comparator::new(Direction::Min, 0.25);
        assert_eq!(cmp.min_delta(), 0.25);

        let cmp = Comparator::new(Direction::Max, 0.25);
        assert_eq!(cmp.min_delta(), 0.25);
    }
}
