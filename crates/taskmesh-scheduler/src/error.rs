//! Error types for the registry.

use thiserror::Error;

/// Registry errors.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Lookup for a shard the registry does not currently know. Expected
    /// for call sites driven by external, potentially-stale input.
    #[error("unknown worker: {0}")]
    UnknownWorker(String),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
