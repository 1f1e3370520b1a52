//! Command handlers, one module per area.

pub mod catalog;
pub mod orders;
pub mod shipments;
