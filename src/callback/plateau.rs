//! Learning-rate reduction when a monitored metric plateaus

use super::compare::Direction;
use super::context::FitContext;
use super::patience::Patience;
use super::tracker::Tracker;
use super::traits::{CallbackAction, FitCallback};
use crate::error::Result;

/// Divides every hyper group's learning rate by `factor` on plateau
///
/// After `patience` consecutive non-improving epochs the reduction fires,
/// the wait count restarts, and the fit keeps going; this callback never
/// aborts.
///
/// # Example
///
/// ```rust
/// use rastrear::callback::ReduceLrOnPlateau;
///
/// // Halve the learning rate after 3 stalled epochs
/// let plateau = ReduceLrOnPlateau::new("valid_loss").patience(3).factor(2.0);
/// ```
#[derive(Clone, Debug)]
pub struct ReduceLrOnPlateau {
    tracker: Tracker,
    patience: Patience,
    factor: f64,
}

impl ReduceLrOnPlateau {
    /// Watch `monitor` with patience 1 and reduction factor 10
    pub fn new(monitor: impl Into<String>) -> Self {
        Self {
            tracker: Tracker::new(monitor),
            patience: Patience::new(1),
            factor: 10.0,
        }
    }

    /// Tolerate up to `limit` consecutive non-improving epochs between
    /// reductions
    pub fn patience(mut self, limit: usize) -> Self {
        self.patience = Patience::new(limit);
        self
    }

    /// Divide learning rates by `factor` on each reduction; must be positive
    pub fn factor(mut self, factor: f64) -> Self {
        self.factor = factor;
        self
    }

    /// Require improvements to clear `min_delta`
    pub fn min_delta(mut self, min_delta: f64) -> Self {
        self.tracker = self.tracker.min_delta(min_delta);
        self
    }

    /// Override the direction inferred from the monitor name
    pub fn direction(mut self, direction: Direction) -> Self {
        self.tracker = self.tracker.direction(direction);
        self
    }

    /// Best monitored value seen since fit begin
    pub fn best(&self) -> f64 {
        self.tracker.best()
    }

    /// Epochs waited since the last improvement or reduction
    pub fn wait(&self) -> usize {
        self.patience.wait()
    }
}

impl FitCallback for ReduceLrOnPlateau {
    fn name(&self) -> &'static str {
        "reduce_lr_on_plateau"
    }

    fn on_fit_begin(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        self.patience.reset();
        self.tracker.begin_fit(ctx.metrics())?;
        Ok(CallbackAction::Continue)
    }

    fn on_epoch_end(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        if self.tracker.observe(ctx.metrics()).is_none() {
            return Ok(CallbackAction::Continue);
        }
        if self.patience.record(self.tracker.new_best()) {
            for group in ctx.hyper_groups_mut() {
                group.lr /= self.factor;
            }
            self.patience.reset();
            println!("Epoch {}: reducing lr to {}", ctx.epoch, ctx.lr());
        }
        Ok(CallbackAction::Continue)
    }
}
