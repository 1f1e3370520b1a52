//! Caller-side validation refusals.
//!
//! These are raised before any remote call is attempted and are reported
//! separately from gateway failures.

use thiserror::Error;

/// A form or command input that failed a precondition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("product name is required")]
    EmptyProductName,
    #[error("a category must be selected")]
    MissingCategory,
    #[error("image URL is required")]
    MissingImage,
    #[error("price must be greater than 0")]
    NonPositivePrice,
    #[error("category name is required")]
    EmptyCategoryName,
    #[error("slug cannot be empty")]
    EmptySlug,
    #[error("tracking code is required")]
    EmptyTrackingCode,
    #[error("package status is required")]
    EmptyPackageStatus,
    #[error("current location is required")]
    EmptyLocation,
    #[error("a product link is required")]
    MissingProductLink,
    #[error("a description of the order is required")]
    MissingDescription,
    #[error("quantity must be at least 1")]
    ZeroQuantity,
    #[error("a destination country is required")]
    MissingCountry,
    #[error("cart is empty")]
    EmptyCart,
}

/// Refuse with `err` when `value` is blank.
pub(crate) fn require(value: &str, err: ValidationError) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(err)
    } else {
        Ok(())
    }
}

/// Refuse with `err` when an optional value is present but blank.
pub(crate) fn require_if_present(
    value: Option<&str>,
    err: ValidationError,
) -> Result<(), ValidationError> {
    value.map_or(Ok(()), |v| require(v, err))
}
