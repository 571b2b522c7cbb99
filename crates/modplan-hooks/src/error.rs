//! Error types for the hooks system

use thiserror::Error;

/// Errors that can occur in the hooks system
#[derive(Debug, Error)]
pub enum HooksError {
    /// Hook not found in the registry
    ///
    /// The string contains the hook ID that was not found.
    #[error("Hook not found: {0}")]
    HookNotFound(String),

    /// Storage or registry error
    ///
    /// Raised when the registry lock has been poisoned by a panicking writer.
    #[error("Storage error: {0}")]
    StorageError(String),
}

/// Result type for hooks operations
pub type Result<T> = std::result::Result<T, HooksError>;
