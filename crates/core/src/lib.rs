//! Preorder Core - Shared domain vocabulary.
//!
//! This crate provides common types used across all preorder components:
//! - `storefront` - Catalog, shipment and cart data layer
//! - `cli` - Command-line driver for operators and customers
//!
//! # Architecture
//!
//! The core crate contains only types and pure functions - no I/O, no HTTP
//! clients, no persistence. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Typed identifiers, prices, statuses, slugs and tracking codes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
