//! The fit loop driving callback dispatch

use std::time::Instant;

use crate::callback::{CallbackManager, FitCallback, FitContext};
use crate::error::Result;

/// Summary of one fit run
#[derive(Clone, Debug)]
pub struct FitSummary {
    /// Number of fully completed epochs
    pub epochs_run: usize,
    /// Mean training loss of the last completed epoch, NaN when none ran
    pub final_loss: f64,
    /// Lowest mean training loss across completed epochs, NaN when none ran
    pub best_loss: f64,
    /// Whether a callback aborted the fit before `max_epochs`
    pub stopped_early: bool,
    /// Wall-clock duration of the fit
    pub elapsed_secs: f64,
}

struct EpochsOutcome {
    epochs_run: usize,
    final_loss: f64,
    best_loss: Option<f64>,
    stopped_early: bool,
}

/// Drives epochs and dispatches lifecycle events to callbacks
///
/// The loop owns a [`FitContext`] and a [`CallbackManager`]. Each epoch it
/// obtains the batch losses from `train_fn`, fires a batch-end event per
/// loss, records the epoch's metric row from `eval_fn`, and fires epoch
/// end. A callback abort stops the remaining epochs; fit-end cleanup runs
/// in every case, including configuration errors at fit begin.
///
/// # Example
///
/// ```rust
/// use rastrear::{EarlyStopping, FitContext, FitLoop, HyperGroup, MemStore, ModelParams};
///
/// let ctx = FitContext::new(
///     ["valid_loss"],
///     vec![HyperGroup::new(0.1)],
///     ModelParams::default(),
///     Box::new(MemStore::new()),
/// );
/// let mut fit = FitLoop::new(ctx);
/// fit.add_callback(EarlyStopping::new("valid_loss").patience(2));
///
/// // Validation loss never moves, so patience runs out
/// let summary = fit.fit(10, |_| vec![1.0, 0.8], |_| vec![0.9]).unwrap();
/// assert!(summary.stopped_early);
/// assert!(summary.epochs_run < 10);
/// ```
pub struct FitLoop {
    ctx: FitContext,
    callbacks: CallbackManager,
}

impl FitLoop {
    /// Create a loop around prepared fit state
    pub fn new(ctx: FitContext) -> Self {
        Self {
            ctx,
            callbacks: CallbackManager::new(),
        }
    }

    /// Register a callback for subsequent fits
    pub fn add_callback<C: FitCallback + 'static>(&mut self, callback: C) {
        self.callbacks.add(callback);
    }

    /// Shared fit state
    pub fn context(&self) -> &FitContext {
        &self.ctx
    }

    /// Mutable fit state
    pub fn context_mut(&mut self) -> &mut FitContext {
        &mut self.ctx
    }

    /// Run up to `max_epochs` epochs
    ///
    /// `train_fn` performs one epoch of training through the context and
    /// returns its batch losses; `eval_fn` then produces one value per
    /// evaluation metric, in recorder order. Callback aborts end the fit
    /// early and are not errors; hook failures and malformed metric rows
    /// surface as `Err` after cleanup has run.
    pub fn fit<T, E>(&mut self, max_epochs: usize, mut train_fn: T, mut eval_fn: E) -> Result<FitSummary>
    where
        T: FnMut(&mut FitContext) -> Vec<f64>,
        E: FnMut(&mut FitContext) -> Vec<f64>,
    {
        let start = Instant::now();
        self.ctx.epoch = 0;
        self.ctx.max_epochs = max_epochs;
        self.ctx.batch_loss = 0.0;
        self.ctx.elapsed_secs = 0.0;
        self.ctx.metrics_mut().clear();

        let outcome = self.run_epochs(max_epochs, &mut train_fn, &mut eval_fn, start);
        let cleanup = self.callbacks.on_fit_end(&mut self.ctx);

        let outcome = outcome?;
        cleanup?;

        Ok(FitSummary {
            epochs_run: outcome.epochs_run,
            final_loss: outcome.final_loss,
            best_loss: outcome.best_loss.unwrap_or(outcome.final_loss),
            stopped_early: outcome.stopped_early,
            elapsed_secs: start.elapsed().as_secs_f64(),
        })
    }

    fn run_epochs<T, E>(
        &mut self,
        max_epochs: usize,
        train_fn: &mut T,
        eval_fn: &mut E,
        start: Instant,
    ) -> Result<EpochsOutcome>
    where
        T: FnMut(&mut FitContext) -> Vec<f64>,
        E: FnMut(&mut FitContext) -> Vec<f64>,
    {
        let mut outcome = EpochsOutcome {
            epochs_run: 0,
            final_loss: f64::NAN,
            best_loss: None,
            stopped_early: false,
        };

        if self.callbacks.on_fit_begin(&mut self.ctx)?.is_abort() {
            outcome.stopped_early = true;
            return Ok(outcome);
        }

        'epochs: for epoch in 0..max_epochs {
            self.ctx.epoch = epoch;

            let losses = train_fn(&mut self.ctx);
            for &loss in &losses {
                self.ctx.batch_loss = loss;
                if self.callbacks.on_batch_end(&mut self.ctx)?.is_abort() {
                    outcome.stopped_early = true;
                    break 'epochs;
                }
            }

            let train_loss = if losses.is_empty() {
                0.0
            } else {
                losses.iter().sum::<f64>() / losses.len() as f64
            };

            let eval_values = eval_fn(&mut self.ctx);
            self.ctx.metrics_mut().push_epoch(train_loss, &eval_values)?;

            outcome.final_loss = train_loss;
            outcome.best_loss = Some(outcome.best_loss.map_or(train_loss, |b| b.min(train_loss)));
            outcome.epochs_run = epoch + 1;
            self.ctx.elapsed_secs = start.elapsed().as_secs_f64();

            if self.callbacks.on_epoch_end(&mut self.ctx)?.is_abort() {
                outcome.stopped_early = true;
                break;
            }
        }

        Ok(outcome)
    }
}
