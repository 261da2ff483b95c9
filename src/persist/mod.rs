//! Model persistence for checkpointing
//!
//! The persistence collaborator behind checkpoint callbacks: a live
//! parameter set ([`ModelParams`]), its serializable image
//! ([`ModelState`]), and named stores to persist and reload it.
//! [`DirStore`] writes JSON files on disk; [`MemStore`] backs tests and
//! demos.

mod model;
mod store;

pub use model::{ModelParams, ModelState, ParamSpec};
pub use store::{DirStore, MemStore, ModelStore};
