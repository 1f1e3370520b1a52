//! Package conversion functions.
//!
//! The tracking code travels as `tracking_id` / `trackingId` and the route as
//! `shipping_route` / `shippingRoute`.

use chrono::Utc;
use preorder_core::{PackageId, ShippingRoute, TrackingCode};
use serde_json::Value;

use super::{Field, MappingError, WireConvention, WireReader, WireWriter};
use crate::models::{NewPackage, Package, PackagePatch};

const ID: Field = Field::plain("id");
const TRACKING_ID: Field = Field::new("tracking_id", "trackingId");
const STATUS: Field = Field::plain("status");
const SHIPPING_ROUTE: Field = Field::new("shipping_route", "shippingRoute");
const CURRENT_LOCATION: Field = Field::new("current_location", "currentLocation");
const ORIGIN: Field = Field::plain("origin");
const DESTINATION: Field = Field::plain("destination");
const CREATED_AT: Field = Field::new("created_at", "createdAt");
const UPDATED_AT: Field = Field::new("updated_at", "updatedAt");
const ESTIMATED_DELIVERY: Field = Field::new("estimated_delivery", "estimatedDelivery");

/// Convert a wire package into the domain model.
///
/// Missing route defaults to sea and missing timestamps to now.
///
/// # Errors
///
/// Returns `MappingError` if `id` or the tracking code is absent, or a
/// present field has the wrong type.
pub fn package_from_wire(value: &Value) -> Result<Package, MappingError> {
    let wire = WireReader::new(value)?;
    let now = Utc::now();

    Ok(Package {
        id: PackageId::new(wire.required_string(ID)?),
        tracking_code: TrackingCode::new(wire.required_string(TRACKING_ID)?),
        status: wire.string(STATUS)?.unwrap_or_default(),
        shipping_route: wire.parsed::<ShippingRoute>(SHIPPING_ROUTE)?.unwrap_or_default(),
        current_location: wire.string(CURRENT_LOCATION)?.unwrap_or_default(),
        origin: wire.string(ORIGIN)?.unwrap_or_default(),
        destination: wire.string(DESTINATION)?.unwrap_or_default(),
        created_at: wire.timestamp(CREATED_AT)?.unwrap_or(now),
        updated_at: wire.timestamp(UPDATED_AT)?.unwrap_or(now),
        estimated_delivery: wire.string(ESTIMATED_DELIVERY)?,
    })
}

#[must_use]
pub fn package_to_wire(package: &Package, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put(ID, package.id.as_str())
        .put(TRACKING_ID, package.tracking_code.as_str())
        .put(STATUS, package.status.as_str())
        .put(SHIPPING_ROUTE, package.shipping_route.as_str())
        .put(CURRENT_LOCATION, package.current_location.as_str())
        .put(ORIGIN, package.origin.as_str())
        .put(DESTINATION, package.destination.as_str())
        .put_timestamp(CREATED_AT, package.created_at)
        .put_timestamp(UPDATED_AT, package.updated_at)
        .put_opt(ESTIMATED_DELIVERY, package.estimated_delivery.as_deref());
    wire.finish()
}

#[must_use]
pub fn new_package_to_wire(input: &NewPackage, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put(TRACKING_ID, input.tracking_code.as_str())
        .put(STATUS, input.status.as_str())
        .put(SHIPPING_ROUTE, input.shipping_route.as_str())
        .put(CURRENT_LOCATION, input.current_location.as_str())
        .put(ORIGIN, input.origin.as_str())
        .put(DESTINATION, input.destination.as_str())
        .put_opt(ESTIMATED_DELIVERY, input.estimated_delivery.as_deref());
    wire.finish()
}

#[must_use]
pub fn package_patch_to_wire(patch: &PackagePatch, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put_opt(TRACKING_ID, patch.tracking_code.as_ref().map(TrackingCode::as_str))
        .put_opt(STATUS, patch.status.as_deref())
        .put_opt(SHIPPING_ROUTE, patch.shipping_route.map(ShippingRoute::as_str))
        .put_opt(CURRENT_LOCATION, patch.current_location.as_deref())
        .put_opt(ORIGIN, patch.origin.as_deref())
        .put_opt(DESTINATION, patch.destination.as_deref())
        .put_opt(ESTIMATED_DELIVERY, patch.estimated_delivery.as_deref());
    wire.finish()
}
