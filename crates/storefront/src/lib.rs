//! Preorder storefront data layer.
//!
//! Keeps the catalog, shipment records and cart for one session, talks to
//! the REST API through a single gateway, and composes the messages that hand
//! orders off to the brand's messaging account.
//!
//! # Modules
//!
//! - [`api`] - HTTP gateway and wire-format conversions
//! - [`catalog`] - Products, categories and packages with a pluggable backend
//! - [`cart`] - Cart contents, cached on disk
//! - [`messages`] / [`checkout`] - Order messages and deep links
//! - [`state`] - Session wiring from configuration

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod error;
pub mod messages;
pub mod models;
pub mod state;
pub mod storage;

pub use api::{ApiClient, ApiError};
pub use cart::CartStore;
pub use catalog::{CatalogBackend, CatalogStore, LocalBackend, RemoteBackend};
pub use checkout::Checkout;
pub use config::StorefrontConfig;
pub use error::{CatalogError, Result};
pub use state::Storefront;
pub use storage::LocalStorage;
