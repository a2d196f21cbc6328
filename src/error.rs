//! Crate-wide error taxonomy.
//!
//! Two failure classes exist and they are deliberately kept apart:
//! [`CacheError::InvalidInput`] is fatal to the calling request and is never
//! retried, while [`CacheError::StorageUnavailable`] is a transient
//! persistence failure that the façade recovers from locally.

use thiserror::Error;

/// Errors produced by the caching layer.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Fingerprint construction failed because a required identity component
    /// was missing or normalized to nothing.
    #[error("invalid input: {field} is required")]
    InvalidInput {
        /// Name of the offending field, e.g. `"subject_id"`.
        field: &'static str,
    },

    /// The persistence layer could not be reached or returned a
    /// transport/auth error. [`CacheService`] degrades on this variant
    /// instead of propagating it; the store implementations themselves
    /// always surface it.
    ///
    /// [`CacheService`]: crate::application::services::CacheService
    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

impl CacheError {
    /// Shorthand for a missing-identity error.
    pub fn invalid_input(field: &'static str) -> Self {
        Self::InvalidInput { field }
    }

    /// Returns true for errors the façade is allowed to swallow.
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, Self::StorageUnavailable(_))
    }
}

impl From<sqlx::Error> for CacheError {
    fn from(e: sqlx::Error) -> Self {
        Self::StorageUnavailable(e.to_string())
    }
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;
