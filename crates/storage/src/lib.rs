#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]

pub mod json;
pub mod memory;

use liftlog_domain::Snapshot;
use thiserror::Error;

pub use memory::Memory;


/// Backing store for the persisted part of the session state. The state is
/// written as a whole; there are no partial updates.
pub trait StateRepository {
    /// Returns the stored state, or `None` if nothing has been written yet.
    fn read_state(&self) -> Result<Option<Snapshot>, StorageError>;

    fn write_state(&self, snapshot: &Snapshot) -> Result<(), StorageError>;
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("failed to encode state: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("stored state is invalid: {0}")]
    InvalidData(String),
    #[error("{0}")]
    Unknown(String),
}
