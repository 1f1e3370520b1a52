//! Order conversion functions.
//!
//! Orders travel as `{ id, type, items: [...], total, message, created_at }`.

use chrono::Utc;
use preorder_core::{OrderId, OrderKind, ProductId};
use rust_decimal::Decimal;
use serde_json::Value;

use super::{Field, MappingError, WireConvention, WireReader, WireWriter};
use crate::models::{NewOrder, Order, OrderLine};

const ID: Field = Field::plain("id");
const TYPE: Field = Field::plain("type");
const ITEMS: Field = Field::plain("items");
const TOTAL: Field = Field::plain("total");
const MESSAGE: Field = Field::plain("message");
const CREATED_AT: Field = Field::new("created_at", "createdAt");

const PRODUCT_ID: Field = Field::new("product_id", "productId");
const NAME: Field = Field::plain("name");
const UNIT_PRICE: Field = Field::new("unit_price", "unitPrice");
const QUANTITY: Field = Field::plain("quantity");

/// Convert a wire order into the domain model.
///
/// # Errors
///
/// Returns `MappingError` if `id` is absent or a field has the wrong type.
pub fn order_from_wire(value: &Value) -> Result<Order, MappingError> {
    let wire = WireReader::new(value)?;
    let lines = wire
        .array(ITEMS)?
        .iter()
        .map(line_from_wire)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Order {
        id: OrderId::new(wire.required_string(ID)?),
        kind: wire.parsed::<OrderKind>(TYPE)?.unwrap_or_default(),
        lines,
        total: wire.decimal(TOTAL)?.unwrap_or(Decimal::ZERO),
        message: wire.string(MESSAGE)?.unwrap_or_default(),
        created_at: wire.timestamp(CREATED_AT)?.unwrap_or_else(Utc::now),
    })
}

fn line_from_wire(value: &Value) -> Result<OrderLine, MappingError> {
    let wire = WireReader::new(value)?;
    Ok(OrderLine {
        product_id: wire.string(PRODUCT_ID)?.map(ProductId::new),
        name: wire.required_string(NAME)?,
        unit_price: wire.decimal(UNIT_PRICE)?,
        quantity: wire.count(QUANTITY)?.unwrap_or(1),
    })
}

fn line_to_wire(line: &OrderLine, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put_opt(PRODUCT_ID, line.product_id.as_ref().map(ProductId::as_str))
        .put(NAME, line.name.as_str())
        .put(QUANTITY, line.quantity);
    if let Some(price) = line.unit_price {
        wire.put_decimal(UNIT_PRICE, price);
    }
    wire.finish()
}

fn lines_to_wire(lines: &[OrderLine], convention: WireConvention) -> Value {
    Value::Array(lines.iter().map(|l| line_to_wire(l, convention)).collect())
}

#[must_use]
pub fn order_to_wire(order: &Order, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    let items = lines_to_wire(&order.lines, wire.convention());
    wire.put(ID, order.id.as_str())
        .put(TYPE, order.kind.as_str())
        .put(ITEMS, items)
        .put_decimal(TOTAL, order.total)
        .put(MESSAGE, order.message.as_str())
        .put_timestamp(CREATED_AT, order.created_at);
    wire.finish()
}

#[must_use]
pub fn new_order_to_wire(input: &NewOrder, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    let items = lines_to_wire(&input.lines, wire.convention());
    wire.put(TYPE, input.kind.as_str())
        .put(ITEMS, items)
        .put_decimal(TOTAL, input.total)
        .put(MESSAGE, input.message.as_str());
    wire.finish()
}
