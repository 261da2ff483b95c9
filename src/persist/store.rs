//! Named checkpoint stores

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::model::{ModelParams, ModelState};
use crate::error::{Error, Result};

/// Persistence collaborator for model checkpoints
///
/// Stores hold snapshots by bare checkpoint name; the store owns the
/// on-disk naming (directory, extension). `load` fails with
/// [`Error::CheckpointNotFound`] for absent names, so callers that treat
/// absence as a valid outcome guard with [`ModelStore::contains`].
pub trait ModelStore {
    /// Persist a snapshot of the model under `name`, overwriting any
    /// previous snapshot with the same name
    fn persist(&mut self, name: &str, model: &ModelParams) -> Result<()>;

    /// Load the snapshot persisted under `name`
    fn load(&self, name: &str) -> Result<ModelParams>;

    /// Whether a snapshot exists under `name`
    fn contains(&self, name: &str) -> bool;
}

/// Directory-backed store writing one pretty-JSON file per checkpoint
///
/// # Example
///
/// ```no_run
/// use rastrear::persist::{DirStore, ModelParams, ModelStore};
///
/// let mut store = DirStore::new("checkpoints");
/// let model = ModelParams::new([("weight", vec![1.0, 2.0])]);
///
/// store.persist("model", &model).unwrap();
/// assert!(store.contains("model"));
/// ```
#[derive(Clone, Debug)]
pub struct DirStore {
    dir: PathBuf,
}

impl DirStore {
    /// Create a store rooted at `dir` (created on first persist)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path a checkpoint name maps to
    pub fn checkpoint_path(&self, name: &str) -> PathBuf {
        self.dir.join(format!("{name}.json"))
    }

    /// Directory this store writes into
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ModelStore for DirStore {
    fn persist(&mut self, name: &str, model: &ModelParams) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let state = model.to_state();
        let json = serde_json::to_string_pretty(&state)
            .map_err(|e| Error::Serialization(format!("checkpoint encoding failed: {e}")))?;

        let mut file = File::create(self.checkpoint_path(name))?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    fn load(&self, name: &str) -> Result<ModelParams> {
        let path = self.checkpoint_path(name);
        if !path.is_file() {
            return Err(Error::CheckpointNotFound(name.to_string()));
        }

        let content = std::fs::read_to_string(&path)?;
        let state: ModelState = serde_json::from_str(&content)
            .map_err(|e| Error::Serialization(format!("checkpoint decoding failed: {e}")))?;
        Ok(ModelParams::from_state(state))
    }

    fn contains(&self, name: &str) -> bool {
        self.checkpoint_path(name).is_file()
    }
}

/// In-memory store keyed by bare checkpoint name
///
/// Snapshots round-trip through [`ModelState`] so the stored content is a
/// copy, never a live alias of the model.
#[derive(Clone, Debug, Default)]
pub struct MemStore {
    slots: HashMap<String, ModelState>,
}

impl MemStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of persisted snapshots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when nothing has been persisted
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl ModelStore for MemStore {
    fn persist(&mut self, name: &str, model: &ModelParams) -> Result<()> {
        self.slots.insert(name.to_string(), model.to_state());
        Ok(())
    }

    fn load(&self, name: &str) -> Result<ModelParams> {
        self.slots
            .get(name)
            .cloned()
            .map(ModelParams::from_state)
            .ok_or_else(|| Error::CheckpointNotFound(name.to_string()))
    }

    fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }
}
