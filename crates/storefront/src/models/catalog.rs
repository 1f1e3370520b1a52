//! Catalog models: products and categories.

use chrono::{DateTime, Utc};
use preorder_core::{CategoryId, ProductId, ProductStatus, slugify};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::validation::{ValidationError, require, require_if_present};

/// A product available for purchase or preorder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Estimated price; final price is confirmed over the messaging channel.
    pub price_estimate: Decimal,
    /// May point at a category that no longer exists.
    pub category_id: CategoryId,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub status: ProductStatus,
    #[serde(default)]
    pub estimated_delivery: Option<String>,
    #[serde(default)]
    pub stock: u32,
}

/// Fields submitted when creating a product.
///
/// The backend assigns the identifier and creation timestamp.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price_estimate: Decimal,
    pub category_id: CategoryId,
    pub image_url: String,
    pub is_featured: bool,
    pub status: ProductStatus,
    pub estimated_delivery: Option<String>,
    pub stock: u32,
}

/// Partial update for a product. `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_estimate: Option<Decimal>,
    pub category_id: Option<CategoryId>,
    pub image_url: Option<String>,
    pub is_featured: Option<bool>,
    pub status: Option<ProductStatus>,
    pub estimated_delivery: Option<String>,
    pub stock: Option<u32>,
}

impl NewProduct {
    /// Check the admin form rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, ValidationError::EmptyProductName)?;
        require(self.category_id.as_str(), ValidationError::MissingCategory)?;
        require(&self.image_url, ValidationError::MissingImage)?;
        if self.price_estimate <= Decimal::ZERO {
            return Err(ValidationError::NonPositivePrice);
        }
        Ok(())
    }

    /// Materialize the product once an identifier and timestamp are known.
    #[must_use]
    pub fn into_product(self, id: ProductId, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            description: self.description,
            price_estimate: self.price_estimate,
            category_id: self.category_id,
            image_url: self.image_url,
            is_featured: self.is_featured,
            created_at,
            status: self.status,
            estimated_delivery: self.estimated_delivery,
            stock: self.stock,
        }
    }
}

impl ProductPatch {
    /// Check the admin form rules for every present field.
    ///
    /// # Errors
    ///
    /// Returns the first rule a present field breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_if_present(self.name.as_deref(), ValidationError::EmptyProductName)?;
        require_if_present(
            self.category_id.as_ref().map(CategoryId::as_str),
            ValidationError::MissingCategory,
        )?;
        require_if_present(self.image_url.as_deref(), ValidationError::MissingImage)?;
        if self.price_estimate.is_some_and(|p| p <= Decimal::ZERO) {
            return Err(ValidationError::NonPositivePrice);
        }
        Ok(())
    }

    /// Whether the patch changes nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply present fields onto a product.
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name.clone_from(name);
        }
        if let Some(description) = &self.description {
            product.description.clone_from(description);
        }
        if let Some(price) = self.price_estimate {
            product.price_estimate = price;
        }
        if let Some(category_id) = &self.category_id {
            product.category_id = category_id.clone();
        }
        if let Some(image_url) = &self.image_url {
            product.image_url.clone_from(image_url);
        }
        if let Some(featured) = self.is_featured {
            product.is_featured = featured;
        }
        if let Some(status) = self.status {
            product.status = status;
        }
        if let Some(delivery) = &self.estimated_delivery {
            product.estimated_delivery = Some(delivery.clone());
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
    }
}

/// A product grouping with a URL-safe slug.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    /// Derived from the name by default; may be edited independently.
    pub slug: String,
}

/// Fields submitted when creating a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
}

/// Partial update for a category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
}

impl NewCategory {
    /// Build a category input with the slug derived from the name.
    #[must_use]
    pub fn from_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self { name, slug }
    }

    /// Check the admin form rules.
    ///
    /// # Errors
    ///
    /// Returns the first rule the input breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require(&self.name, ValidationError::EmptyCategoryName)?;
        require(&self.slug, ValidationError::EmptySlug)
    }

    /// Materialize the category once an identifier is known.
    #[must_use]
    pub fn into_category(self, id: CategoryId) -> Category {
        Category {
            id,
            name: self.name,
            slug: self.slug,
        }
    }
}

impl CategoryPatch {
    /// Rename a category and re-derive its slug, matching the admin form.
    #[must_use]
    pub fn rename(name: impl Into<String>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            name: Some(name),
            slug: Some(slug),
        }
    }

    /// Check the admin form rules for every present field.
    ///
    /// # Errors
    ///
    /// Returns the first rule a present field breaks.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_if_present(self.name.as_deref(), ValidationError::EmptyCategoryName)?;
        require_if_present(self.slug.as_deref(), ValidationError::EmptySlug)
    }

    /// Apply present fields onto a category.
    pub fn apply_to(&self, category: &mut Category) {
        if let Some(name) = &self.name {
            category.name.clone_from(name);
        }
        if let Some(slug) = &self.slug {
            category.slug.clone_from(slug);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Smart Watch Pro".to_string(),
            description: "Fitness tracking".to_string(),
            price_estimate: Decimal::new(120, 0),
            category_id: CategoryId::new("1"),
            image_url: "https://img.example.com/watch.jpg".to_string(),
            is_featured: true,
            status: ProductStatus::Preorder,
            estimated_delivery: Some("10-15 days".to_string()),
            stock: 0,
        }
    }

    #[test]
    fn test_new_product_valid() {
        assert_eq!(new_product().validate(), Ok(()));
    }

    #[test]
    fn test_new_product_rules() {
        let mut input = new_product();
        input.name = " ".to_string();
        assert_eq!(input.validate(), Err(ValidationError::EmptyProductName));

        let mut input = new_product();
        input.category_id = CategoryId::new("");
        assert_eq!(input.validate(), Err(ValidationError::MissingCategory));

        let mut input = new_product();
        input.image_url = String::new();
        assert_eq!(input.validate(), Err(ValidationError::MissingImage));

        let mut input = new_product();
        input.price_estimate = Decimal::ZERO;
        assert_eq!(input.validate(), Err(ValidationError::NonPositivePrice));
    }

    #[test]
    fn test_patch_applies_only_present_fields() {
        let mut product = new_product().into_product(ProductId::new("p1"), Utc::now());
        let patch = ProductPatch {
            price_estimate: Some(Decimal::new(99, 0)),
            is_featured: Some(false),
            ..ProductPatch::default()
        };
        assert_eq!(patch.validate(), Ok(()));
        patch.apply_to(&mut product);

        assert_eq!(product.price_estimate, Decimal::new(99, 0));
        assert!(!product.is_featured);
        assert_eq!(product.name, "Smart Watch Pro");
    }

    #[test]
    fn test_patch_rejects_non_positive_price() {
        let patch = ProductPatch {
            price_estimate: Some(Decimal::new(-1, 0)),
            ..ProductPatch::default()
        };
        assert_eq!(patch.validate(), Err(ValidationError::NonPositivePrice));
    }

    #[test]
    fn test_empty_patch() {
        assert!(ProductPatch::default().is_empty());
        assert!(!CategoryPatch::rename("Toys").slug.unwrap_or_default().is_empty());
    }

    #[test]
    fn test_category_from_name_derives_slug() {
        let input = NewCategory::from_name("Phone Protection");
        assert_eq!(input.slug, "phone-protection");
        assert_eq!(input.validate(), Ok(()));
    }

    #[test]
    fn test_category_slug_required() {
        let input = NewCategory::from_name("!!!");
        assert_eq!(input.validate(), Err(ValidationError::EmptySlug));
    }

    #[test]
    fn test_category_patch_keeps_independent_slug() {
        let mut category = NewCategory::from_name("Electronics").into_category(CategoryId::new("1"));
        let patch = CategoryPatch {
            name: Some("Consumer Electronics".to_string()),
            slug: None,
        };
        patch.apply_to(&mut category);
        assert_eq!(category.name, "Consumer Electronics");
        assert_eq!(category.slug, "electronics");
    }
}
