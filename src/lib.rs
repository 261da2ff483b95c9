//! Metric-tracking callbacks for training loops.
//!
//! This crate provides the policy layer that watches a recorded metric
//! and acts on it between epochs:
//! - Early stopping after a run of epochs without improvement
//! - Checkpointing on every new best value, with best-model reload
//! - Learning-rate reduction when the metric plateaus
//! - NaN/infinity guarding on per-batch losses
//! - Progress reporting over the recorded history
//!
//! Policies implement [`FitCallback`] and run inside a [`FitLoop`], which
//! owns the shared [`FitContext`] (metric history, optimizer
//! hyperparameters, model parameters, checkpoint store) and dispatches
//! lifecycle events in declared order.
//!
//! # Example
//!
//! ```rust
//! use rastrear::{
//!     EarlyStopping, FitContext, FitLoop, HyperGroup, MemStore, ModelCheckpoint, ModelParams,
//! };
//!
//! let ctx = FitContext::new(
//!     ["valid_loss"],
//!     vec![HyperGroup::new(0.1)],
//!     ModelParams::default(),
//!     Box::new(MemStore::new()),
//! );
//! let mut fit = FitLoop::new(ctx);
//! fit.add_callback(ModelCheckpoint::new("valid_loss"));
//! fit.add_callback(EarlyStopping::new("valid_loss").patience(2));
//!
//! let valid = [0.9, 0.7, 0.8, 0.82, 0.85];
//! let summary = fit
//!     .fit(5, |_| vec![1.0], |ctx| vec![valid[ctx.epoch]])
//!     .unwrap();
//!
//! // Improvement stalls after the second epoch, so patience runs out
//! // and the best checkpoint is reloaded at fit end.
//! assert!(summary.stopped_early);
//! assert_eq!(summary.epochs_run, 4);
//! ```

pub mod callback;
pub mod error;
pub mod fit;
pub mod optim;
pub mod persist;
pub mod record;

pub use callback::{
    CallbackAction, CallbackManager, Comparator, Direction, EarlyStopping, FitCallback,
    FitContext, ModelCheckpoint, NanGuard, Patience, Progress, ReduceLrOnPlateau, Tracker,
};
pub use error::{Error, Result};
pub use fit::{FitLoop, FitSummary};
pub use optim::HyperGroup;
pub use persist::{DirStore, MemStore, ModelParams, ModelState, ModelStore, ParamSpec};
pub use record::{MetricLog, TRAIN_LOSS};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_monitor_error_names_the_alternatives() {
        let log = MetricLog::new(["valid_loss", "accuracy"]);
        let mut tracker = Tracker::new("f1");
        let msg = tracker.begin_fit(&log).unwrap_err().to_string();
        assert!(msg.contains("f1"));
        assert!(msg.contains("valid_loss"));
        assert!(msg.contains("accuracy"));
    }

    #[test]
    fn test_reexported_policies_share_the_tracker_builders() {
        let stop = EarlyStopping::new("error_rate").min_delta(0.01).patience(4);
        assert_eq!(stop.wait(), 0);

        let ckpt = ModelCheckpoint::new("accuracy").save_as("best");
        assert_eq!(ckpt.save_name(), "best");
    }

    #[test]
    fn test_direction_defaults_follow_the_monitor_name() {
        assert_eq!(Direction::for_monitor("valid_loss"), Direction::Min);
        assert_eq!(Direction::for_monitor("accuracy"), Direction::Max);
    }
}
