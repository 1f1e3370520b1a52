//! Status enums and recommended values for catalog and shipment records.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Product availability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    /// Held locally and ready to ship.
    #[default]
    InStock,
    /// Ordered from the supplier after the customer commits.
    Preorder,
}

impl ProductStatus {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InStock => "in_stock",
            Self::Preorder => "preorder",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::InStock => "In Stock",
            Self::Preorder => "Pre-order",
        }
    }
}

impl fmt::Display for ProductStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "in_stock" | "inStock" => Ok(Self::InStock),
            "preorder" => Ok(Self::Preorder),
            _ => Err(format!("invalid product status: {s}")),
        }
    }
}

/// Freight route for a shipment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ShippingRoute {
    #[default]
    Sea,
    Air,
}

impl ShippingRoute {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sea => "sea",
            Self::Air => "air",
        }
    }

    /// Tracking code prefix for this route.
    #[must_use]
    pub const fn tracking_prefix(self) -> &'static str {
        match self {
            Self::Sea => "SEA",
            Self::Air => "AIR",
        }
    }
}

impl fmt::Display for ShippingRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShippingRoute {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sea" => Ok(Self::Sea),
            "air" => Ok(Self::Air),
            _ => Err(format!("invalid shipping route: {s}")),
        }
    }
}

/// Package statuses offered to staff, in shipment order.
///
/// Package status is free text; these are suggestions, not a closed set.
pub const RECOMMENDED_PACKAGE_STATUSES: &[&str] = &[
    "Order Made",
    "Processing",
    "Dispatched from China",
    "In Transit to Ghana",
    "Arrived at Port",
    "Customs Clearance",
    "Out for Delivery",
    "Delivered",
];

/// Locations offered to staff when updating a package.
pub const COMMON_LOCATIONS: &[&str] = &[
    "China - Warehouse",
    "China - Port of Departure",
    "In Transit",
    "Ghana - Port of Arrival",
    "Ghana - Customs",
    "Ghana - Distribution Center",
    "Ghana - Out for Delivery",
];

/// Status given to a package created without one.
pub const DEFAULT_PACKAGE_STATUS: &str = "Order Made";

/// Position of a status within [`RECOMMENDED_PACKAGE_STATUSES`], ignoring case.
///
/// Returns `None` for custom statuses.
#[must_use]
pub fn package_status_step(status: &str) -> Option<usize> {
    let status = status.trim();
    RECOMMENDED_PACKAGE_STATUSES
        .iter()
        .position(|s| s.eq_ignore_ascii_case(status))
}

/// Kind of order handed off to the messaging channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderKind {
    /// Built from cart contents.
    #[default]
    Cart,
    /// Free-form request for an item not in the catalog.
    Custom,
}

impl OrderKind {
    /// Wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Cart => "cart",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cart" => Ok(Self::Cart),
            "custom" => Ok(Self::Custom),
            _ => Err(format!("invalid order kind: {s}")),
        }
    }
}
