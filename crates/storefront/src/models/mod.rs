//! Domain models for the storefront.
//!
//! These are the only shapes the stores and the CLI ever see. Wire-format
//! field names stay inside [`crate::api::conversions`].

pub mod catalog;
pub mod order;
pub mod shipment;
pub mod validation;

pub use catalog::{Category, CategoryPatch, NewCategory, NewProduct, Product, ProductPatch};
pub use order::{CartItem, CustomOrderRequest, NewOrder, Order, OrderLine};
pub use shipment::{NewPackage, Package, PackagePatch};
pub use validation::ValidationError;
