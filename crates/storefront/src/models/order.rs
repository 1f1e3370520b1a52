//! Cart lines, custom order requests and recorded orders.

use chrono::{DateTime, Utc};
use preorder_core::{OrderId, OrderKind, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::catalog::Product;
use super::validation::{ValidationError, require};

/// A product in the cart, with its details captured at the time of adding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    pub product_id: ProductId,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub image_url: String,
    /// Always at least 1 while the item is in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Snapshot a product into a cart line.
    #[must_use]
    pub fn from_product(product: &Product, quantity: u32) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            price: product.price_estimate,
            image_url: product.image_url.clone(),
            quantity,
        }
    }

    /// Price multiplied by quantity.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Free-form request for an item that is not in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomOrderRequest {
    /// A link to the product, or its name.
    pub product_link: String,
    pub description: String,
    pub quantity: u32,
    pub country: String,
    #[serde(default)]
    pub reference_image: Option<String>,
}

impl CustomOrderRequest {
    /// Check the order form rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the request breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.product_link, ValidationError::MissingProductLink)?;
        require(&self.description, ValidationError::MissingDescription)?;
        if self.quantity == 0 {
            return Err(ValidationError::ZeroQuantity);
        }
        require(&self.country, ValidationError::MissingCountry)
    }

    /// The reference image, if one was given and is not blank.
    #[must_use]
    pub fn reference_image(&self) -> Option<&str> {
        self.reference_image
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

/// One line of a recorded order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderLine {
    /// Absent for custom orders.
    pub product_id: Option<ProductId>,
    pub name: String,
    /// Absent when the price is still to be quoted.
    pub unit_price: Option<Decimal>,
    pub quantity: u32,
}

impl From<&CartItem> for OrderLine {
    fn from(item: &CartItem) -> Self {
        Self {
            product_id: Some(item.product_id.clone()),
            name: item.name.clone(),
            unit_price: Some(item.price),
            quantity: item.quantity,
        }
    }
}

/// An order as recorded by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub kind: OrderKind,
    pub lines: Vec<OrderLine>,
    /// Estimated total; zero for custom orders awaiting a quote.
    pub total: Decimal,
    /// The message sent to the messaging channel.
    pub message: String,
    pub created_at: DateTime<Utc>,
}

/// An order ready to be recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub kind: OrderKind,
    pub lines: Vec<OrderLine>,
    pub total: Decimal,
    pub message: String,
}
