//! Order message builders for the messaging handoff.
//!
//! Provides pure functions for building the text sent to the brand's
//! messaging account:
//! - Cart orders, with a line per item and an estimated total
//! - Custom orders, with the request fields and a quote request
//!
//! plus [`whatsapp_url`] for the deep link that opens a chat with the text
//! pre-filled. Nothing here performs I/O.

use std::fmt::Write;

use preorder_core::{CurrencyCode, Price};
use rust_decimal::Decimal;

use crate::models::{CartItem, CustomOrderRequest};

const CART_CLOSING: &str = "Please confirm final price and shipping cost to my country.";
const CUSTOM_CLOSING: &str = "Please provide a quote for this order.";

/// Build the message for a cart checkout.
///
/// ```text
/// Hi Brand, I would like to order:
///
/// A x2 - GH₵20.00
/// B x1 - GH₵5.00
///
/// Total: GH₵25.00
///
/// Please confirm final price and shipping cost to my country.
/// ```
#[must_use]
pub fn compose_cart_order_message(
    items: &[CartItem],
    brand_name: &str,
    currency: CurrencyCode,
) -> String {
    let mut message = format!("Hi {brand_name}, I would like to order:\n\n");

    for item in items {
        let line_total = Price::new(item.line_total(), currency);
        let _ = writeln!(message, "{} x{} - {}", item.name, item.quantity, line_total.display());
    }

    let total: Decimal = items.iter().map(CartItem::line_total).sum();
    let _ = write!(
        message,
        "\nTotal: {}\n\n{CART_CLOSING}",
        Price::new(total, currency).display()
    );
    message
}

/// Build the message for a custom order request.
///
/// The reference image line is included only when one was given.
#[must_use]
pub fn compose_custom_order_message(request: &CustomOrderRequest, brand_name: &str) -> String {
    let mut message = format!("Hi {brand_name}, I have a custom order request:\n\n");

    let _ = writeln!(message, "Product Link: {}", request.product_link.trim());
    let _ = writeln!(message, "Description: {}", request.description.trim());
    let _ = writeln!(message, "Quantity: {}", request.quantity);
    let _ = writeln!(message, "Shipping Country: {}", request.country.trim());
    if let Some(image) = request.reference_image() {
        let _ = writeln!(message, "Reference Image: {image}");
    }

    let _ = write!(message, "\n{CUSTOM_CLOSING}");
    message
}

/// Deep link that opens a chat with `number` and `message` pre-filled.
///
/// Everything but digits is stripped from the number, as the link format
/// requires.
#[must_use]
pub fn whatsapp_url(number: &str, message: &str) -> String {
    let digits: String = number.chars().filter(char::is_ascii_digit).collect();
    format!("https://wa.me/{digits}?text={}", urlencoding::encode(message))
}
