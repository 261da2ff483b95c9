//! Early stopping when a monitored metric stops improving

use super::compare::Direction;
use super::context::FitContext;
use super::patience::Patience;
use super::tracker::Tracker;
use super::traits::{CallbackAction, FitCallback};
use crate::error::Result;

/// Aborts the fit after `patience` consecutive epochs without improvement
///
/// # Example
///
/// ```rust
/// use rastrear::callback::EarlyStopping;
///
/// // Stop after 3 non-improving epochs, improvements under 0.001 don't count
/// let early_stop = EarlyStopping::new("valid_loss").patience(3).min_delta(0.001);
/// ```
#[derive(Clone, Debug)]
pub struct EarlyStopping {
    tracker: Tracker,
    patience: Patience,
}

impl EarlyStopping {
    /// Watch `monitor` with patience 1: the first non-improving epoch after
    /// the best aborts the fit
    pub fn new(monitor: impl Into<String>) -> Self {
        Self {
            tracker: Tracker::new(monitor),
            patience: Patience::new(1),
        }
    }

    /// Tolerate up to `limit` consecutive non-improving epochs
    pub fn patience(mut self, limit: usize) -> Self {
        self.patience = Patience::new(limit);
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

    /// Epochs waited since the last improvement
    pub fn wait(&self) -> usize {
        self.patience.wait()
    }
}

impl FitCallback for EarlyStopping {
    fn name(&self) -> &'static str {
        "early_stopping"
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
            eprintln!(
                "No improvement since epoch {}: early stopping",
                ctx.epoch.saturating_sub(self.patience.wait())
            );
            return Ok(CallbackAction::Abort);
        }
        Ok(CallbackAction::Continue)
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::optim::HyperGroup;
    use crate::persist::{MemStore, ModelParams};
    use proptest::prelude::*;

    fn ctx() -> FitContext {
        FitContext::new(
            ["valid_loss"],
            vec![HyperGroup::new(0.1)],
            ModelParams::default(),
            Box::new(MemStore::new()),
        )
    }

    proptest! {
        /// A flat loss curve aborts exactly when patience runs out
        #[test]
        fn flat_curve_stops_at_patience(
            patience in 1usize..8,
            value in 0.1f64..10.0,
        ) {
            let mut es = EarlyStopping::new("valid_loss").patience(patience);
            let mut ctx = ctx();
            es.on_fit_begin(&mut ctx).unwrap();

            for epoch in 0..=patience {
                ctx.epoch = epoch;
                ctx.metrics_mut().push_epoch(value, &[value]).unwrap();
                let action = es.on_epoch_end(&mut ctx).unwrap();
                if epoch < patience {
                    prop_assert_eq!(action, CallbackAction::Continue);
                } else {
                    prop_assert_eq!(action, CallbackAction::Abort);
                }
            }
        }

        /// A strictly improving curve never stops
        #[test]
        fn improving_curve_never_stops(
            start in 1.0f64..10.0,
            epochs in 1usize..20,
        ) {
            let mut es = EarlyStopping::new("valid_loss");
            let mut ctx = ctx();
            es.on_fit_begin(&mut ctx).unwrap();

            for epoch in 0..epochs {
                ctx.epoch = epoch;
                let value = start / (epoch + 1) as f64;
                ctx.metrics_mut().push_epoch(value, &[value]).unwrap();
                prop_assert_eq!(es.on_epoch_end(&mut ctx).unwrap(), CallbackAction::Continue);
            }
        }
    }
}
