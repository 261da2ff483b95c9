//! Core trait and action type for fit callbacks
//!
//! Callbacks hook into the fit loop at four points: fit begin, batch end,
//! epoch end and fit end. Hooks return `Result<CallbackAction>`: `Err` is a
//! real failure that propagates out of `fit`, while `Ok(Abort)` asks the
//! loop to wind down cleanly.

use super::context::FitContext;
use crate::error::Result;

/// Action requested by a callback after handling an event
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CallbackAction {
    /// Continue the fit normally
    Continue,
    /// Abort the fit; remaining epochs are skipped and fit-end cleanup runs
    Abort,
}

impl CallbackAction {
    /// True for [`CallbackAction::Abort`]
    pub fn is_abort(self) -> bool {
        self == CallbackAction::Abort
    }
}

/// Trait for fit-loop callbacks
///
/// All event hooks have default no-op implementations, so implementors only
/// write the events they care about. `name` identifies the callback for
/// ordering constraints and must be unique within one fit.
pub trait FitCallback: Send {
    /// Identifier used by `runs_before`/`runs_after` constraints
    fn name(&self) -> &'static str;

    /// Names of callbacks this one must run before
    fn runs_before(&self) -> &'static [&'static str] {
        &[]
    }

    /// Names of callbacks this one must run after
    fn runs_after(&self) -> &'static [&'static str] {
        &[]
    }

    /// Called once before the first epoch
    fn on_fit_begin(&mut self, _ctx: &mut FitContext) -> Result<CallbackAction> {
        Ok(CallbackAction::Continue)
    }

    /// Called after every training batch
    fn on_batch_end(&mut self, _ctx: &mut FitContext) -> Result<CallbackAction> {
        Ok(CallbackAction::Continue)
    }

    /// Called after every epoch, once its metric row is recorded
    fn on_epoch_end(&mut self, _ctx: &mut FitContext) -> Result<CallbackAction> {
        Ok(CallbackAction::Continue)
    }

    /// Called exactly once when the fit ends, aborted or not
    fn on_fit_end(&mut self, _ctx: &mut FitContext) -> Result<()> {
        Ok(())
    }
}
