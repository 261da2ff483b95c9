//! Per-epoch metric recording
//!
//! `MetricLog` is the narrow surface callbacks see of the metric-recording
//! collaborator: an ordered list of metric names and one row of values per
//! epoch. Column 0 is reserved for the training loss; columns 1..N carry
//! the evaluation metrics under their caller-supplied names.

use crate::error::{Error, Result};

/// Name of the reserved training-loss column
pub const TRAIN_LOSS: &str = "train_loss";

/// Append-only log of named per-epoch metric values
///
/// One row per epoch, aligned with [`MetricLog::names`]: the training loss
/// at index 0, evaluation metrics after it. Callbacks read the log through
/// the fit context; only the training loop appends to it.
///
/// # Example
///
/// ```rust
/// use rastrear::record::MetricLog;
///
/// let mut log = MetricLog::new(["valid_loss", "accuracy"]);
/// log.push_epoch(0.8, &[0.9, 0.61]).unwrap();
///
/// assert_eq!(log.epochs(), 1);
/// assert_eq!(log.last_row().unwrap(), &[0.8, 0.9, 0.61]);
/// ```
#[derive(Clone, Debug)]
pub struct MetricLog {
    names: Vec<String>,
    rows: Vec<Vec<f64>>,
}

impl MetricLog {
    /// Create a log for the given evaluation metric names
    ///
    /// The training-loss column is prepended automatically; `eval_names`
    /// name columns 1..N in row order.
    pub fn new<I, S>(eval_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names = vec![TRAIN_LOSS.to_string()];
        names.extend(eval_names.into_iter().map(Into::into));
        Self { names, rows: Vec::new() }
    }

    /// All column names, training loss first
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Column index of a monitorable metric
    ///
    /// Searches the names after the fixed training-loss column and returns
    /// the absolute column index, so the result indexes directly into a
    /// row. `None` if the name is not recorded.
    pub fn monitor_index(&self, monitor: &str) -> Option<usize> {
        self.names[1..].iter().position(|n| n == monitor).map(|p| p + 1)
    }

    /// Append one epoch's row
    ///
    /// `eval_values` align with the names after column 0; the full row is
    /// the training loss followed by them. Length mismatches are rejected.
    pub fn push_epoch(&mut self, train_loss: f64, eval_values: &[f64]) -> Result<()> {
        if eval_values.len() + 1 != self.names.len() {
            return Err(Error::RowShape {
                expected: self.names.len(),
                got: eval_values.len() + 1,
            });
        }
        let mut row = Vec::with_capacity(self.names.len());
        row.push(train_loss);
        row.extend_from_slice(eval_values);
        self.rows.push(row);
        Ok(())
    }

    /// Number of recorded epochs
    pub fn epochs(&self) -> usize {
        self.rows.len()
    }

    /// True before the first epoch row lands
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a given epoch, if recorded
    pub fn row(&self, epoch: usize) -> Option<&[f64]> {
        self.rows.get(epoch).map(Vec::as_slice)
    }

    /// The most recent epoch's row
    pub fn last_row(&self) -> Option<&[f64]> {
        self.rows.last().map(Vec::as_slice)
    }

    /// Single value by epoch and column
    pub fn value(&self, epoch: usize, column: usize) -> Option<f64> {
        self.rows.get(epoch).and_then(|r| r.get(column)).copied()
    }

    /// Drop all recorded rows, keeping the column names
    ///
    /// The fit loop clears the log at fit begin so each fit records its own
    /// history.
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
