//! Core types for the preorder storefront.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod slug;
pub mod status;
pub mod tracking;

pub use id::*;
pub use price::{CurrencyCode, Price, UnknownCurrency};
pub use slug::slugify;
pub use status::*;
pub use tracking::TrackingCode;
