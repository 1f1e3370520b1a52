//! Checkout handoff.
//!
//! A [`Checkout`] bundles everything needed to hand an order to the
//! messaging channel: the composed text, the deep link, and an order record
//! that may optionally be sent to the backend.

use preorder_core::OrderKind;
use rust_decimal::Decimal;

use crate::config::BrandConfig;
use crate::messages::{compose_cart_order_message, compose_custom_order_message, whatsapp_url};
use crate::models::{CartItem, CustomOrderRequest, NewOrder, OrderLine, ValidationError};

/// A composed order ready to be sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkout {
    pub message: String,
    pub url: String,
    pub order: NewOrder,
}

impl Checkout {
    /// Build a checkout from cart lines.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyCart` if there are no lines.
    pub fn from_cart(items: &[CartItem], brand: &BrandConfig) -> Result<Self, ValidationError> {
        if items.is_empty() {
            return Err(ValidationError::EmptyCart);
        }

        let message = compose_cart_order_message(items, &brand.name, brand.currency);
        let total: Decimal = items.iter().map(CartItem::line_total).sum();

        Ok(Self {
            url: whatsapp_url(&brand.whatsapp_number, &message),
            order: NewOrder {
                kind: OrderKind::Cart,
                lines: items.iter().map(OrderLine::from).collect(),
                total,
                message: message.clone(),
            },
            message,
        })
    }

    /// Build a checkout from a custom order request.
    ///
    /// The recorded total is zero until a quote is agreed.
    ///
    /// # Errors
    ///
    /// Returns the first form rule the request breaks.
    pub fn custom(request: &CustomOrderRequest, brand: &BrandConfig) -> Result<Self, ValidationError> {
        request.validate()?;

        let message = compose_custom_order_message(request, &brand.name);
        let line = OrderLine {
            product_id: None,
            name: request.product_link.trim().to_string(),
            unit_price: None,
            quantity: request.quantity,
        };

        Ok(Self {
            url: whatsapp_url(&brand.whatsapp_number, &message),
            order: NewOrder {
                kind: OrderKind::Custom,
                lines: vec![line],
                total: Decimal::ZERO,
                message: message.clone(),
            },
            message,
        })
    }
}
