//! Fit termination on non-finite batch loss

use super::context::FitContext;
use super::traits::{CallbackAction, FitCallback};
use crate::error::Result;

/// Aborts the fit as soon as a batch loss goes NaN or infinite
///
/// Runs before the progress callback so a poisoned loss is never displayed
/// as a normal value. Stateless; the fit it aborts keeps its partial model
/// and optimizer state for inspection.
#[derive(Clone, Copy, Debug, Default)]
pub struct NanGuard;

impl NanGuard {
    /// Create the guard
    pub fn new() -> Self {
        Self
    }
}

impl FitCallback for NanGuard {
    fn name(&self) -> &'static str {
        "nan_guard"
    }

    fn runs_before(&self) -> &'static [&'static str] {
        &["progress"]
    }

    fn on_batch_end(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        if !ctx.batch_loss.is_finite() {
            return Ok(CallbackAction::Abort);
        }
        Ok(CallbackAction::Continue)
    }
}
