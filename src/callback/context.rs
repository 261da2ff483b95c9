//! Mutable fit state shared with callbacks

use crate::error::Result;
use crate::optim::HyperGroup;
use crate::persist::{ModelParams, ModelStore};
use crate::record::MetricLog;

/// Training state passed to every callback hook
///
/// The context owns the metric recorder, the optimizer hyper-parameter
/// groups, the model parameters and a checkpoint store. Callbacks read
/// metrics through [`FitContext::metrics`] and mutate hyper-parameters or
/// snapshot the model through the dedicated methods.
pub struct FitContext {
    /// Current epoch (0-indexed)
    pub epoch: usize,
    /// Total epochs planned for this fit
    pub max_epochs: usize,
    /// Loss of the most recent training batch
    pub batch_loss: f64,
    /// Seconds since the fit started
    pub elapsed_secs: f64,
    metrics: MetricLog,
    hyper_groups: Vec<HyperGroup>,
    model: ModelParams,
    store: Box<dyn ModelStore + Send>,
}

impl FitContext {
    /// Create a context recording `eval_names` after the training loss
    pub fn new<I, S>(
        eval_names: I,
        hyper_groups: Vec<HyperGroup>,
        model: ModelParams,
        store: Box<dyn ModelStore + Send>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            epoch: 0,
            max_epochs: 0,
            batch_loss: 0.0,
            elapsed_secs: 0.0,
            metrics: MetricLog::new(eval_names),
            hyper_groups,
            model,
            store,
        }
    }

    /// Recorded metric history
    pub fn metrics(&self) -> &MetricLog {
        &self.metrics
    }

    /// Mutable metric history; the fit loop appends one row per epoch
    pub fn metrics_mut(&mut self) -> &mut MetricLog {
        &mut self.metrics
    }

    /// Optimizer hyper-parameter groups
    pub fn hyper_groups(&self) -> &[HyperGroup] {
        &self.hyper_groups
    }

    /// Mutable hyper-parameter groups, for schedule-style callbacks
    pub fn hyper_groups_mut(&mut self) -> &mut [HyperGroup] {
        &mut self.hyper_groups
    }

    /// Learning rate of the last hyper group, 0.0 when none exist
    pub fn lr(&self) -> f64 {
        self.hyper_groups.last().map_or(0.0, |g| g.lr)
    }

    /// Current model parameters
    pub fn model(&self) -> &ModelParams {
        &self.model
    }

    /// Mutable model parameters
    pub fn model_mut(&mut self) -> &mut ModelParams {
        &mut self.model
    }

    /// Snapshot the current model under `name` in the checkpoint store
    pub fn save_model(&mut self, name: &str) -> Result<()> {
        self.store.persist(name, &self.model)
    }

    /// Replace the current model with the snapshot stored under `name`
    pub fn load_model(&mut self, name: &str) -> Result<()> {
        self.model = self.store.load(name)?;
        Ok(())
    }

    /// Whether the store holds a snapshot under `name`
    pub fn has_checkpoint(&self, name: &str) -> bool {
        self.store.contains(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::persist::MemStore;

    fn ctx() -> FitContext {
        FitContext::new(
            ["valid_loss", "accuracy"],
            vec![HyperGroup::new(0.1), HyperGroup::new(0.01)],
            ModelParams::new([("weight", vec![1.0, 2.0])]),
            Box::new(MemStore::new()),
        )
    }

    #[test]
    fn test_context_initial_state() {
        let ctx = ctx();
        assert_eq!(ctx.epoch, 0);
        assert_eq!(ctx.max_epochs, 0);
        assert_eq!(ctx.batch_loss, 0.0);
        assert!(ctx.metrics().is_empty());
    }

    #[test]
    fn test_lr_reads_last_group() {
        let ctx = ctx();
        assert_eq!(ctx.lr(), 0.01);

        let empty = FitContext::new(
            ["valid_loss"],
            Vec::new(),
            ModelParams::default(),
            Box::new(MemStore::new()),
        );
        assert_eq!(empty.lr(), 0.0);
    }

    #[test]
    fn test_hyper_groups_mut_scales_in_place() {
        let mut ctx = ctx();
        for group in ctx.hyper_groups_mut() {
            group.lr /= 10.0;
        }
        assert_eq!(ctx.hyper_groups()[0].lr, 0.01);
        assert_eq!(ctx.hyper_groups()[1].lr, 0.001);
    }

    #[test]
    fn test_save_and_load_model_round_trip() {
        let mut ctx = ctx();
        ctx.save_model("best").unwrap();
        assert!(ctx.has_checkpoint("best"));

        ctx.model_mut().param_mut("weight").unwrap()[0] = 99.0;
        ctx.load_model("best").unwrap();
        assert_eq!(ctx.model().param("weight").unwrap()[0], 1.0);
    }

    #[test]
    fn test_load_model_missing_checkpoint() {
        let mut ctx = ctx();
        assert!(!ctx.has_checkpoint("absent"));
        let err = ctx.load_model("absent").unwrap_err();
        assert!(matches!(err, Error::CheckpointNotFound(_)));
    }

    #[test]
    fn test_metrics_mut_records_epochs() {
        let mut ctx = ctx();
        ctx.metrics_mut().push_epoch(0.5, &[0.6, 0.8]).unwrap();
        assert_eq!(ctx.metrics().epochs(), 1);
        assert_eq!(ctx.metrics().value(0, 1), Some(0.6));
    }
}
