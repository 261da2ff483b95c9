//! Model checkpointing driven by a monitored metric

use super::compare::Direction;
use super::context::FitContext;
use super::tracker::Tracker;
use super::traits::{CallbackAction, FitCallback};
use crate::error::Result;

/// Persists model snapshots during the fit
///
/// Two mutually exclusive modes:
/// - best-only (default): saves under the bare checkpoint name whenever the
///   monitored metric sets a new best, and reloads that snapshot at fit end
///   so the in-memory model is the best one seen, not the last one.
/// - every-epoch: saves under `{name}_{epoch}` after every epoch without
///   consulting the monitor, and never reloads.
///
/// # Example
///
/// ```rust
/// use rastrear::callback::ModelCheckpoint;
///
/// let best = ModelCheckpoint::new("valid_loss").save_as("bestmodel");
/// let all = ModelCheckpoint::new("valid_loss").every_epoch();
/// ```
#[derive(Clone, Debug)]
pub struct ModelCheckpoint {
    tracker: Tracker,
    save_name: String,
    every_epoch: bool,
    pub(crate) last_saved: Option<String>,
}

impl ModelCheckpoint {
    /// Save the best model by `monitor` under the name `"model"`
    pub fn new(monitor: impl Into<String>) -> Self {
        Self {
            tracker: Tracker::new(monitor),
            save_name: "model".to_string(),
            every_epoch: false,
            last_saved: None,
        }
    }

    /// Checkpoint under `name` instead of `"model"`
    pub fn save_as(mut self, name: impl Into<String>) -> Self {
        self.save_name = name.into();
        self
    }

    /// Save after every epoch under epoch-suffixed names, skipping the
    /// best-model bookkeeping and the fit-end reload
    pub fn every_epoch(mut self) -> Self {
        self.every_epoch = true;
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

    /// Name used for best-only saves
    pub fn save_name(&self) -> &str {
        &self.save_name
    }

    /// Name used for the save after `epoch` in every-epoch mode
    pub fn epoch_checkpoint_name(&self, epoch: usize) -> String {
        format!("{}_{epoch}", self.save_name)
    }

    /// Best monitored value seen since fit begin
    pub fn best(&self) -> f64 {
        self.tracker.best()
    }
}

impl FitCallback for ModelCheckpoint {
    fn name(&self) -> &'static str {
        "model_checkpoint"
    }

    fn on_fit_begin(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        self.last_saved = None;
        self.tracker.begin_fit(ctx.metrics())?;
        Ok(CallbackAction::Continue)
    }

    fn on_epoch_end(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        if self.every_epoch {
            let name = self.epoch_checkpoint_name(ctx.epoch);
            ctx.save_model(&name)?;
            self.last_saved = Some(name);
        } else if self.tracker.observe(ctx.metrics()).is_some() && self.tracker.new_best() {
            ctx.save_model(&self.save_name)?;
            self.last_saved = Some(self.save_name.clone());
        }
        Ok(CallbackAction::Continue)
    }

    fn on_fit_end(&mut self, ctx: &mut FitContext) -> Result<()> {
        // Absence means no epoch ever improved; that is a valid outcome
        if !self.every_epoch && ctx.has_checkpoint(&self.save_name) {
            ctx.load_model(&self.save_name)?;
        }
        Ok(())
    }
}
