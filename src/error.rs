//! Error types for the tracking-callback crate

use thiserror::Error;

/// Errors surfaced by recorders, stores and callback configuration
#[derive(Debug, Error)]
pub enum Error {
    /// Monitored metric name is not among the recorded metric names.
    ///
    /// Raised once, at fit begin, when a tracker binds its monitor column.
    #[error("monitored metric '{monitor}' not found in recorded metrics {available:?}")]
    MonitorNotFound {
        /// The name the tracker was configured to watch
        monitor: String,
        /// The names the recorder actually carries (after the training-loss column)
        available: Vec<String>,
    },

    /// Callback ordering constraints contain a cycle
    #[error("callback ordering constraints form a cycle involving '{0}'")]
    OrderingCycle(&'static str),

    /// Metric row length does not match the recorded names
    #[error("metric row has {got} values, expected {expected}")]
    RowShape {
        /// Number of names the recorder was created with
        expected: usize,
        /// Number of values in the rejected row
        got: usize,
    },

    /// No checkpoint persisted under the requested name
    #[error("checkpoint '{0}' not found")]
    CheckpointNotFound(String),

    /// Checkpoint state could not be serialized or deserialized
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// File I/O failure in a directory-backed store
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for tracking operations
pub type Result<T> = std::result::Result<T, Error>;
