//! Progress reporting for fit runs

use super::context::FitContext;
use super::traits::{CallbackAction, FitCallback};
use crate::error::Result;

/// Prints a metric header at fit begin and one summary line per epoch
///
/// Batch losses are echoed every `log_interval` batches; an interval of 0
/// silences them.
#[derive(Clone, Debug)]
pub struct Progress {
    log_interval: usize,
    batches_seen: usize,
}

impl Progress {
    /// Create a progress callback echoing every `log_interval` batches
    pub fn new(log_interval: usize) -> Self {
        Self {
            log_interval,
            batches_seen: 0,
        }
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(10)
    }
}

impl FitCallback for Progress {
    fn name(&self) -> &'static str {
        "progress"
    }

    fn on_fit_begin(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        self.batches_seen = 0;
        println!("epoch {}", ctx.metrics().names().join(" "));
        Ok(CallbackAction::Continue)
    }

    fn on_batch_end(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        self.batches_seen += 1;
        if self.log_interval > 0 && self.batches_seen.is_multiple_of(self.log_interval) {
            println!("  Batch {}: loss: {:.4}", self.batches_seen, ctx.batch_loss);
        }
        Ok(CallbackAction::Continue)
    }

    fn on_epoch_end(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        if let Some(row) = ctx.metrics().last_row() {
            let stats = ctx
                .metrics()
                .names()
                .iter()
                .zip(row)
                .map(|(name, value)| format!("{name}: {value:.4}"))
                .collect::<Vec<_>>()
                .join(", ");
            println!(
                "Epoch {}/{}: {} (lr: {:.2e}, {:.1}s)",
                ctx.epoch + 1,
                ctx.max_epochs,
                stats,
                ctx.lr(),
                ctx.elapsed_secs
            );
        }
        Ok(CallbackAction::Continue)
    }
}
