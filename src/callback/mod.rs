//! Callback system for fit-loop events
//!
//! Provides extensible hooks for the fit lifecycle:
//! - `on_fit_begin` / `on_fit_end`
//! - `on_batch_end`
//! - `on_epoch_end`
//!
//! Hooks signal control flow through [`CallbackAction`]: returning
//! `Ok(CallbackAction::Abort)` winds the fit down cleanly (fit-end cleanup
//! still runs), while `Err` propagates as a real failure.
//!
//! # Example
//!
//! ```rust
//! use rastrear::callback::{CallbackAction, FitCallback, FitContext};
//! use rastrear::Result;
//!
//! struct PrintCallback;
//!
//! impl FitCallback for PrintCallback {
//!     fn name(&self) -> &'static str {
//!         "print"
//!     }
//!
//!     fn on_epoch_end(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
//!         println!("Epoch {} done, batch loss {:.4}", ctx.epoch, ctx.batch_loss);
//!         Ok(CallbackAction::Continue)
//!     }
//! }
//! ```

mod checkpoint;
mod compare;
mod context;
mod early_stopping;
mod manager;
mod nan_guard;
mod patience;
mod plateau;
mod progress;
mod tracker;
mod traits;

// Re-export all public types
pub use checkpoint::ModelCheckpoint;
pub use compare::{Comparator, Direction};
pub use context::FitContext;
pub use early_stopping::EarlyStopping;
pub use manager::CallbackManager;
pub use nan_guard::NanGuard;
pub use patience::Patience;
pub use plateau::ReduceLrOnPlateau;
pub use progress::Progress;
pub use tracker::Tracker;
pub use traits::{CallbackAction, FitCallback};
