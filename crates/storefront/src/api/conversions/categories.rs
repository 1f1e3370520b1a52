//! Category conversion functions.

use preorder_core::{CategoryId, slugify};
use serde_json::Value;

use super::{Field, MappingError, WireConvention, WireReader, WireWriter};
use crate::models::{Category, CategoryPatch, NewCategory};

const ID: Field = Field::plain("id");
const NAME: Field = Field::plain("name");
const SLUG: Field = Field::plain("slug");

/// Convert a wire category into the domain model.
///
/// A missing slug is derived from the name.
///
/// # Errors
///
/// Returns `MappingError` if `id` or `name` is absent or mistyped.
pub fn category_from_wire(value: &Value) -> Result<Category, MappingError> {
    let wire = WireReader::new(value)?;
    let name = wire.required_string(NAME)?;
    let slug = wire.string(SLUG)?.unwrap_or_else(|| slugify(&name));

    Ok(Category {
        id: CategoryId::new(wire.required_string(ID)?),
        name,
        slug,
    })
}

#[must_use]
pub fn category_to_wire(category: &Category, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put(ID, category.id.as_str())
        .put(NAME, category.name.as_str())
        .put(SLUG, category.slug.as_str());
    wire.finish()
}

#[must_use]
pub fn new_category_to_wire(input: &NewCategory, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put(NAME, input.name.as_str())
        .put(SLUG, input.slug.as_str());
    wire.finish()
}

#[must_use]
pub fn category_patch_to_wire(patch: &CategoryPatch, convention: WireConvention) -> Value {
    let mut wire = WireWriter::new(convention);
    wire.put_opt(NAME, patch.name.as_deref())
        .put_opt(SLUG, patch.slug.as_deref());
    wire.finish()
}
