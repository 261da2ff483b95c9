//! Optimizer hyperparameter surface
//!
//! Callbacks never see the optimizer itself, only its per-group
//! hyperparameter records. Mutating a group's `lr` here is what the
//! training loop applies on its next step.

/// Hyperparameters of one optimizer parameter group
///
/// The learning rate is the field policies act on; discriminative-rate
/// setups carry one group per layer slice, all visible to callbacks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HyperGroup {
    /// Learning rate applied to this group's parameters
    pub lr: f64,
    /// Weight decay applied to this group's parameters
    pub weight_decay: f64,
}

impl HyperGroup {
    /// Create a group with the given learning rate and no weight decay
    pub fn new(lr: f64) -> Self {
        Self { lr, weight_decay: 0.0 }
    }

    /// Set the weight decay
    pub fn with_weight_decay(mut self, weight_decay: f64) -> Self {
        self.weight_decay = weight_decay;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hyper_group_new() {
        let group = HyperGroup::new(0.1);
        assert_eq!(group.lr, 0.1);
        assert_eq!(group.weight_decay, 0.0);
    }

    #[test]
    fn test_hyper_group_with_weight_decay() {
        let group = HyperGroup::new(0.01).with_weight_decay(1e-4);
        assert_eq!(group.lr, 0.01);
        assert_eq!(group.weight_decay, 1e-4);
    }
}
