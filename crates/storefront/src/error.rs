//! Unified error handling for store operations.
//!
//! `CatalogError` is what every catalog and checkout operation returns. Each
//! layer keeps its own error type and converts into this one with `?`.
//! Refusals that are part of normal operation, such as a blocked category
//! deletion, are modeled as outcomes rather than errors.

use thiserror::Error;

use crate::api::ApiError;
use crate::api::conversions::MappingError;
use crate::models::ValidationError;
use crate::storage::StorageError;

/// Store-level error type.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The REST API request failed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] ApiError),

    /// The API returned a body that could not be mapped.
    #[error("Mapping error: {0}")]
    Mapping(#[from] MappingError),

    /// Local storage could not be read or written.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input was refused before any remote call.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// The backing store has no record with this identifier.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },
}

impl CatalogError {
    /// Whether the failure was a caller-side refusal.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Whether the record did not exist, locally or on the server.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::NotFound { .. } | Self::Gateway(ApiError::NotFound(_))
        )
    }
}

/// Result alias for store operations.
pub type Result<T, E = CatalogError> = std::result::Result<T, E>;
