//! Translation between the REST API's JSON bodies and domain models.
//!
//! This is the only place that knows wire field names. Incoming objects may
//! use either `snake_case` or `camelCase` keys; when both spellings of a field
//! are present the `snake_case` one wins. Outgoing bodies use a single
//! configured [`WireConvention`].

pub mod categories;
pub mod orders;
pub mod packages;
pub mod products;

pub use categories::{category_from_wire, category_patch_to_wire, category_to_wire, new_category_to_wire};
pub use orders::{new_order_to_wire, order_from_wire, order_to_wire};
pub use packages::{new_package_to_wire, package_from_wire, package_patch_to_wire, package_to_wire};
pub use products::{new_product_to_wire, product_from_wire, product_patch_to_wire, product_to_wire};

use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde_json::{Map, Number, Value};
use thiserror::Error;

/// Errors raised while reading a wire object.
#[derive(Debug, Error)]
pub enum MappingError {
    /// The body was not a JSON object.
    #[error("expected a JSON object")]
    NotAnObject,

    /// A field with no default was absent.
    #[error("missing field `{0}`")]
    MissingField(&'static str),

    /// A field was present but could not be coerced.
    #[error("invalid field `{field}`: {reason}")]
    InvalidField { field: &'static str, reason: String },
}

/// Field naming used for outgoing request bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WireConvention {
    /// `price_estimate`, `tracking_id`, ...
    #[default]
    SnakeCase,
    /// `priceEstimate`, `trackingId`, ...
    CamelCase,
}

impl FromStr for WireConvention {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "snake" | "snake_case" => Ok(Self::SnakeCase),
            "camel" | "camelcase" => Ok(Self::CamelCase),
            other => Err(format!("expected `snake` or `camel`, got `{other}`")),
        }
    }
}

/// A wire field known under two spellings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Field {
    snake: &'static str,
    camel: &'static str,
}

impl Field {
    pub(crate) const fn new(snake: &'static str, camel: &'static str) -> Self {
        Self { snake, camel }
    }

    /// A field whose name is the same in both conventions.
    pub(crate) const fn plain(name: &'static str) -> Self {
        Self::new(name, name)
    }

    const fn name(self, convention: WireConvention) -> &'static str {
        match convention {
            WireConvention::SnakeCase => self.snake,
            WireConvention::CamelCase => self.camel,
        }
    }
}

// =============================================================================
// Reading
// =============================================================================

/// Typed access to a wire object, tolerant of both naming conventions.
pub(crate) struct WireReader<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> WireReader<'a> {
    pub(crate) fn new(value: &'a Value) -> Result<Self, MappingError> {
        value
            .as_object()
            .map(|map| Self { map })
            .ok_or(MappingError::NotAnObject)
    }

    /// First non-null value, trying the `snake_case` key before `camelCase`.
    fn raw(&self, field: Field) -> Option<&'a Value> {
        [field.snake, field.camel]
            .into_iter()
            .filter_map(|key| self.map.get(key))
            .find(|v| !v.is_null())
    }

    /// A string field. Numbers are accepted and rendered as text.
    pub(crate) fn string(&self, field: Field) -> Result<Option<String>, MappingError> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(other) => Err(invalid(field, format!("expected a string, got {other}"))),
        }
    }

    pub(crate) fn required_string(&self, field: Field) -> Result<String, MappingError> {
        self.string(field)?
            .ok_or(MappingError::MissingField(field.snake))
    }

    /// A decimal field given as a JSON number or numeric string.
    pub(crate) fn decimal(&self, field: Field) -> Result<Option<Decimal>, MappingError> {
        let text = match self.raw(field) {
            None => return Ok(None),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::String(s)) => s.trim().to_string(),
            Some(other) => return Err(invalid(field, format!("expected a number, got {other}"))),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map(Some)
            .map_err(|e| invalid(field, e.to_string()))
    }

    /// A non-negative integer field given as a JSON number or numeric string.
    pub(crate) fn count(&self, field: Field) -> Result<Option<u32>, MappingError> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::Number(n)) => n
                .as_u64()
                .and_then(|v| u32::try_from(v).ok())
                .map(Some)
                .ok_or_else(|| invalid(field, format!("expected a non-negative integer, got {n}"))),
            Some(Value::String(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(|e: std::num::ParseIntError| invalid(field, e.to_string())),
            Some(other) => Err(invalid(field, format!("expected an integer, got {other}"))),
        }
    }

    /// A boolean field. `"true"`/`"false"` strings are accepted.
    pub(crate) fn flag(&self, field: Field) -> Result<Option<bool>, MappingError> {
        match self.raw(field) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(Value::String(s)) => match s.trim() {
                "true" => Ok(Some(true)),
                "false" => Ok(Some(false)),
                other => Err(invalid(field, format!("expected a boolean, got `{other}`"))),
            },
            Some(other) => Err(invalid(field, format!("expected a boolean, got {other}"))),
        }
    }

    /// An RFC 3339 timestamp field.
    pub(crate) fn timestamp(&self, field: Field) -> Result<Option<DateTime<Utc>>, MappingError> {
        self.string(field)?
            .map(|s| {
                DateTime::parse_from_rfc3339(s.trim())
                    .map(|dt| dt.with_timezone(&Utc))
                    .map_err(|e| invalid(field, e.to_string()))
            })
            .transpose()
    }

    /// A field parsed through `FromStr`.
    pub(crate) fn parsed<T>(&self, field: Field) -> Result<Option<T>, MappingError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.string(field)?
            .map(|s| s.parse().map_err(|e: T::Err| invalid(field, e.to_string())))
            .transpose()
    }

    /// A nested array of objects.
    pub(crate) fn array(&self, field: Field) -> Result<&'a [Value], MappingError> {
        match self.raw(field) {
            None => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(other) => Err(invalid(field, format!("expected an array, got {other}"))),
        }
    }
}

fn invalid(field: Field, reason: String) -> MappingError {
    MappingError::InvalidField {
        field: field.snake,
        reason,
    }
}

// =============================================================================
// Writing
// =============================================================================

/// Builds an outgoing wire object in one convention.
pub(crate) struct WireWriter {
    convention: WireConvention,
    map: Map<String, Value>,
}

impl WireWriter {
    pub(crate) fn new(convention: WireConvention) -> Self {
        Self {
            convention,
            map: Map::new(),
        }
    }

    pub(crate) fn put(&mut self, field: Field, value: impl Into<Value>) -> &mut Self {
        self.map
            .insert(field.name(self.convention).to_string(), value.into());
        self
    }

    /// Insert only when a value is present.
    pub(crate) fn put_opt<V: Into<Value>>(&mut self, field: Field, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.put(field, value);
        }
        self
    }

    pub(crate) fn put_decimal(&mut self, field: Field, value: Decimal) -> &mut Self {
        self.put(field, decimal_to_json(value))
    }

    pub(crate) fn put_timestamp(&mut self, field: Field, value: DateTime<Utc>) -> &mut Self {
        self.put(field, format_timestamp(value))
    }

    pub(crate) const fn convention(&self) -> WireConvention {
        self.convention
    }

    pub(crate) fn finish(&mut self) -> Value {
        Value::Object(std::mem::take(&mut self.map))
    }
}

/// Whole amounts go out as integers, fractional ones as floats.
pub(crate) fn decimal_to_json(value: Decimal) -> Value {
    let normalized = value.normalize();
    if normalized.fract().is_zero()
        && let Some(whole) = normalized.to_i64()
    {
        return Value::Number(Number::from(whole));
    }
    normalized
        .to_f64()
        .and_then(Number::from_f64)
        .map_or_else(|| Value::String(normalized.to_string()), Value::Number)
}

/// Millisecond-precision UTC timestamp, `2024-01-15T10:30:00.000Z`.
pub(crate) fn format_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}
