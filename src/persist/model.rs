//! Live model parameters and their serializable state

use serde::{Deserialize, Serialize};

/// Shape information for one named parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name (e.g. "layer1.weight", "bias")
    pub name: String,
    /// Number of scalar values in the parameter
    pub len: usize,
}

/// Serializable model state
///
/// Parameter specs plus the flattened data of every parameter, in spec
/// order. This is the unit a [`super::ModelStore`] writes and reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelState {
    /// Per-parameter shape information
    pub params: Vec<ParamSpec>,
    /// Flattened parameter data
    pub data: Vec<f32>,
}

/// The live model as callbacks see it: named parameter blobs
///
/// The tensor runtime stays outside this crate; what checkpointing needs
/// is the parameter content, so the model surface is a list of named
/// `f32` blobs with content equality.
///
/// # Example
///
/// ```rust
/// use rastrear::persist::ModelParams;
///
/// let mut model = ModelParams::new([
///     ("weight", vec![0.1, 0.2, 0.3]),
///     ("bias", vec![0.0]),
/// ]);
/// model.param_mut("bias").unwrap()[0] = 0.5;
///
/// assert_eq!(model.param("bias").unwrap(), &[0.5]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelParams {
    params: Vec<(String, Vec<f32>)>,
}

impl ModelParams {
    /// Create a model from named parameter blobs
    pub fn new<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = (S, Vec<f32>)>,
        S: Into<String>,
    {
        Self {
            params: params.into_iter().map(|(n, v)| (n.into(), v)).collect(),
        }
    }

    /// Number of parameters
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True when the model carries no parameters
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter data by name
    pub fn param(&self, name: &str) -> Option<&[f32]> {
        self.params
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// Mutable parameter data by name
    pub fn param_mut(&mut self, name: &str) -> Option<&mut Vec<f32>> {
        self.params
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
    }

    /// Iterate over (name, data) pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.params.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    /// Convert to the serializable state
    pub fn to_state(&self) -> ModelState {
        let mut data = Vec::new();
        let params = self
            .params
            .iter()
            .map(|(name, values)| {
                data.extend_from_slice(values);
                ParamSpec { name: name.clone(), len: values.len() }
            })
            .collect();
        ModelState { params, data }
    }

    /// Rebuild a model from its serializable state
    pub fn from_state(state: ModelState) -> Self {
        let mut offset = 0;
        let params = state
            .params
            .into_iter()
            .map(|spec| {
                let values = state.data[offset..offset + spec.len].to_vec();
                offset += spec.len;
                (spec.name, values)
            })
            .collect();
        Self { params }
    }
}
