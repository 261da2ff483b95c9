//! Callback registry and event dispatch
//!
//! The manager owns the callbacks for one fit session and fires their hooks
//! in a deterministic order: declared `runs_before`/`runs_after` constraints
//! are resolved once per fit by topological sort, and callbacks without
//! constraints keep their registration order.

use std::collections::HashMap;

use super::context::FitContext;
use super::traits::{CallbackAction, FitCallback};
use crate::error::{Error, Result};

/// Dispatches fit events to registered callbacks
pub struct CallbackManager {
    callbacks: Vec<Box<dyn FitCallback>>,
}

impl CallbackManager {
    /// Create an empty manager
    pub fn new() -> Self {
        Self {
            callbacks: Vec::new(),
        }
    }

    /// Register a callback
    pub fn add<C: FitCallback + 'static>(&mut self, callback: C) {
        self.callbacks.push(Box::new(callback));
    }

    /// Check if no callbacks are registered
    pub fn is_empty(&self) -> bool {
        self.callbacks.is_empty()
    }

    /// Number of registered callbacks
    pub fn len(&self) -> usize {
        self.callbacks.len()
    }

    /// Callback names in current dispatch order
    pub fn names(&self) -> Vec<&'static str> {
        self.callbacks.iter().map(|cb| cb.name()).collect()
    }

    /// Resolve ordering constraints and fire fit-begin hooks
    ///
    /// Constraint resolution failures (cycles) and hook errors both surface
    /// here, before any epoch runs.
    pub fn on_fit_begin(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        self.resolve_order()?;
        for cb in &mut self.callbacks {
            if cb.on_fit_begin(ctx)?.is_abort() {
                return Ok(CallbackAction::Abort);
            }
        }
        Ok(CallbackAction::Continue)
    }

    /// Fire batch-end hooks, stopping at the first abort
    pub fn on_batch_end(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        for cb in &mut self.callbacks {
            if cb.on_batch_end(ctx)?.is_abort() {
                return Ok(CallbackAction::Abort);
            }
        }
        Ok(CallbackAction::Continue)
    }

    /// Fire epoch-end hooks, stopping at the first abort
    pub fn on_epoch_end(&mut self, ctx: &mut FitContext) -> Result<CallbackAction> {
        for cb in &mut self.callbacks {
            if cb.on_epoch_end(ctx)?.is_abort() {
                return Ok(CallbackAction::Abort);
            }
        }
        Ok(CallbackAction::Continue)
    }

    /// Fire fit-end hooks on every callback
    ///
    /// Every callback gets its cleanup even when an earlier one fails; the
    /// first error is returned after the loop completes.
    pub fn on_fit_end(&mut self, ctx: &mut FitContext) -> Result<()> {
        let mut first_err = None;
        for cb in &mut self.callbacks {
            if let Err(err) = cb.on_fit_end(ctx) {
                first_err.get_or_insert(err);
            }
        }
        match first_err {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Reorder callbacks so every declared constraint holds
    ///
    /// Kahn's algorithm, picking the lowest registration index among ready
    /// callbacks so unconstrained ones stay in insertion order. Constraints
    /// naming unregistered callbacks are ignored.
    fn resolve_order(&mut self) -> Result<()> {
        let n = self.callbacks.len();
        if n < 2 {
            return Ok(());
        }

        let mut position: HashMap<&'static str, usize> = HashMap::with_capacity(n);
        for (i, cb) in self.callbacks.iter().enumerate() {
            position.entry(cb.name()).or_insert(i);
        }

        let mut successors: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut indegree = vec![0usize; n];
        for (i, cb) in self.callbacks.iter().enumerate() {
            for name in cb.runs_before() {
                if let Some(&j) = position.get(name) {
                    if j != i {
                        successors[i].push(j);
                        indegree[j] += 1;
                    }
                }
            }
            for name in cb.runs_after() {
                if let Some(&j) = position.get(name) {
                    if j != i {
                        successors[j].push(i);
                        indegree[i] += 1;
                    }
                }
            }
        }

        let mut order = Vec::with_capacity(n);
        let mut placed = vec![false; n];
        while order.len() < n {
            let Some(next) = (0..n).find(|&i| !placed[i] && indegree[i] == 0) else {
                let stuck = (0..n).find(|&i| !placed[i]).unwrap_or(0);
                return Err(Error::OrderingCycle(self.callbacks[stuck].name()));
            };
            placed[next] = true;
            order.push(next);
            for &j in &successors[next] {
                indegree[j] -= 1;
            }
        }

        let mut slots: Vec<Option<Box<dyn FitCallback>>> =
            std::mem::take(&mut self.callbacks).into_iter().map(Some).collect();
        self.callbacks = order.into_iter().filter_map(|i| slots[i].take()).collect();
        Ok(())
    }
}

impl Default for CallbackManager {
    fn default() -> Self {
        Self::new()
    }
}
