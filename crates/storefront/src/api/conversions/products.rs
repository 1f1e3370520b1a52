//! Product conversion functions.

use chrono::Utc;
use preorder_core::{CategoryId, ProductId, ProductStatus};
use rust_decimal::Decimal;
use serde_json::Value;

use super::{Field, MappingError, WireConvention, WireReader, WireWriter};
use crate::models::{NewProduct, Product, ProductPatch};

const ID: Field = Field::plain("id");
const NAME: Field = Field::plain("name");
const DESCRIPTION: Field = Field::plain("description");
const PRICE_ESTIMATE: Field = Field::new("price_estimate", "priceEstimate");
const CATEGORY_ID: Field = Field::new("category_id", "categoryId");
const IMAGE_URL: Field = Field::new("image_url", "imageUrl");
const IS_FEATURED: Field = Field::new("is_featured", "isFeatured");
const CREATED_AT: Field = Field::new("created_at", "createdAt");
const STATUS: Field = Field::plain("status");
const ESTIMATED_DELIVERY: Field = Field::new("estimated_delivery", "estimatedDelivery");
const STOCK: Field = Field::plain("stock");

/// Convert a wire product into the domain model.
///
/// Only `id` and `name` are required. Missing status defaults to in stock,
/// missing stock to 0 and a missing timestamp to now.
///
/// # Errors
///
/// Returns `MappingError` if the body is not an object, a required field is
/// absent, or a present field has the wrong type.
pub fn product_from_wire(value: &Value) -> Result<Product, MappingError> {
    let wire = WireReader::new(value)?;

    Ok(Product {
        id: ProductId::new(wire.required_string(ID)?),
        name: wire.required_string(NAME)?,
        description: wire.string(DESCRIPTION)?.unwrap_or_default(),
        price_estimate: wire.decimal(PRICE_ESTIMATE)?.unwrap_or(Decimal::ZERO),
        category_id: CategoryId::new(wire.string(CATEGORY_ID)?.unwrap_or_default()),
        image_url: wire.string(IMAGE_URL)?.unwrap_or_default(),
        is_featured: wire.flag(IS_FEATURED)?.unwrap_or(false),
        created_at: wire.timestamp(CREATED_AT)?.unwrap_or_else(Utc::now),
        status: wire.parsed::<ProductStatus>(STATUS)?.unwrap_or_default(),
        estimated_delivery: wire.string(ESTIMATED_DELIVERY)?,
        stock: wire.count(STOCK)?.unwrap_or(0),
    })
}

/// Convert a domain product into a wire object.
#[must_use]
pub fn product_to_wire(product: &Product, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put(ID, product.id.as_str())
        .put(NAME, product.name.as_str())
        .put(DESCRIPTION, product.description.as_str())
        .put_decimal(PRICE_ESTIMATE, product.price_estimate)
        .put(CATEGORY_ID, product.category_id.as_str())
        .put(IMAGE_URL, product.image_url.as_str())
        .put(IS_FEATURED, product.is_featured)
        .put_timestamp(CREATED_AT, product.created_at)
        .put(STATUS, product.status.as_str())
        .put_opt(ESTIMATED_DELIVERY, product.estimated_delivery.as_deref())
        .put(STOCK, product.stock);
    wire.finish()
}

/// Build the request body for creating a product.
#[must_use]
pub fn new_product_to_wire(input: &NewProduct, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put(NAME, input.name.as_str())
        .put(DESCRIPTION, input.description.as_str())
        .put_decimal(PRICE_ESTIMATE, input.price_estimate)
        .put(CATEGORY_ID, input.category_id.as_str())
        .put(IMAGE_URL, input.image_url.as_str())
        .put(IS_FEATURED, input.is_featured)
        .put(STATUS, input.status.as_str())
        .put_opt(ESTIMATED_DELIVERY, input.estimated_delivery.as_deref())
        .put(STOCK, input.stock);
    wire.finish()
}

/// Build the request body for a partial product update.
///
/// Only fields present in the patch are sent.
#[must_use]
pub fn product_patch_to_wire(patch: &ProductPatch, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put_opt(NAME, patch.name.as_deref())
        .put_opt(DESCRIPTION, patch.description.as_deref())
        .put_opt(CATEGORY_ID, patch.category_id.as_ref().map(CategoryId::as_str))
        .put_opt(IMAGE_URL, patch.image_url.as_deref())
        .put_opt(IS_FEATURED, patch.is_featured)
        .put_opt(STATUS, patch.status.map(ProductStatus::as_str))
        .put_opt(ESTIMATED_DELIVERY, patch.estimated_delivery.as_deref())
        .put_opt(STOCK, patch.stock);
    if let Some(price) = patch.price_estimate {
        wire.put_decimal(PRICE_ESTIMATE, price);
    }
    wire.finish()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    fn snake_wire() -> Value {
        json!({
            "id": "p-1",
            "name": "Smart Watch Pro",
            "description": "Fitness tracking, heart rate monitor",
            "price_estimate": 120,
            "category_id": "1",
            "image_url": "https://img.example.com/watch.jpg",
            "is_featured": true,
            "created_at": "2024-01-15T10:30:00.000Z",
            "status": "preorder",
            "estimated_delivery": "10-15 days",
            "stock": 4
        })
    }

    fn camel_wire() -> Value {
        json!({
            "id": "p-2",
            "name": "Phone Case",
            "description": "Shockproof",
            "priceEstimate": 15.5,
            "categoryId": "3",
            "imageUrl": "https://img.example.com/case.jpg",
            "isFeatured": false,
            "createdAt": "2024-02-01T08:00:00.250Z",
            "status": "in_stock",
            "stock": 12
        })
    }

    #[test]
    fn test_round_trip_snake_case() {
        let wire = snake_wire();
        let product = product_from_wire(&wire).unwrap();
        assert_eq!(product.price_estimate, Decimal::new(120, 0));
        assert_eq!(product.status, ProductStatus::Preorder);
        assert_eq!(product_to_wire(&product, WireConvention::SnakeCase), wire);
    }

    #[test]
    fn test_round_trip_camel_case() {
        let wire = camel_wire();
        let product = product_from_wire(&wire).unwrap();
        assert_eq!(product.price_estimate, Decimal::new(155, 1));
        assert_eq!(product.category_id.as_str(), "3");
        assert_eq!(product_to_wire(&product, WireConvention::CamelCase), wire);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let before = Utc::now();
        let product = product_from_wire(&json!({ "id": 7, "name": "Bare" })).unwrap();
        assert_eq!(product.id.as_str(), "7");
        assert_eq!(product.status, ProductStatus::InStock);
        assert_eq!(product.stock, 0);
        assert_eq!(product.estimated_delivery, None);
        assert!(product.created_at >= before);
    }

    #[test]
    fn test_string_price_and_stock_are_coerced() {
        let product = product_from_wire(&json!({
            "id": "x",
            "name": "X",
            "price_estimate": "45.99",
            "stock": "3",
            "is_featured": "true"
        }))
        .unwrap();
        assert_eq!(product.price_estimate, Decimal::new(4599, 2));
        assert_eq!(product.stock, 3);
        assert!(product.is_featured);
    }

    #[test]
    fn test_missing_name_is_an_error() {
        let err = product_from_wire(&json!({ "id": "x" })).unwrap_err();
        assert!(matches!(err, MappingError::MissingField("name")));
    }

    #[test]
    fn test_invalid_status_is_an_error() {
        let err = product_from_wire(&json!({ "id": "x", "name": "X", "status": "gone" }))
            .unwrap_err();
        assert!(matches!(err, MappingError::InvalidField { field: "status", .. }));
    }

    #[test]
    fn test_patch_sends_only_present_fields() {
        let patch = ProductPatch {
            price_estimate: Some(Decimal::new(99, 0)),
            is_featured: Some(true),
            ..ProductPatch::default()
        };
        assert_eq!(
            product_patch_to_wire(&patch, WireConvention::CamelCase),
            json!({ "priceEstimate": 99, "isFeatured": true })
        );
    }
}
