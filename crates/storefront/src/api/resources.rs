//! Per-resource CRUD operations.

use serde_json::Value;
use tracing::instrument;

use super::{ApiClient, ApiError};

/// A REST collection exposed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    Products,
    Categories,
    Packages,
    Orders,
}

impl Resource {
    /// Collection path relative to the base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Products => "/products",
            Self::Categories => "/categories",
            Self::Packages => "/packages",
            Self::Orders => "/orders",
        }
    }

    fn item_path(self, id: &str) -> String {
        format!("{}/{}", self.path(), urlencoding::encode(id))
    }
}

impl ApiClient {
    // =========================================================================
    // Generic collection operations
    // =========================================================================

    /// List every item of a collection.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails or the body is not a JSON array.
    #[instrument(skip(self))]
    pub async fn list(&self, resource: Resource) -> Result<Vec<Value>, ApiError> {
        match self.get(resource.path()).await? {
            Value::Array(items) => Ok(items),
            other => Err(ApiError::Parse(format!(
                "Expected an array from {}, got {}",
                resource.path(),
                json_kind(&other)
            ))),
        }
    }

    /// Fetch one item by identifier.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` on 404, or another error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn fetch(&self, resource: Resource, id: &str) -> Result<Value, ApiError> {
        self.get(&resource.item_path(id)).await
    }

    /// Create an item from a wire-format body and return the stored item.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, body))]
    pub async fn create(&self, resource: Resource, body: &Value) -> Result<Value, ApiError> {
        self.post(resource.path(), body).await
    }

    /// Update an item with a wire-format body and return the stored item.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self, body), fields(id = %id))]
    pub async fn update(&self, resource: Resource, id: &str, body: &Value) -> Result<Value, ApiError> {
        self.put(&resource.item_path(id), body).await
    }

    /// Delete an item.
    ///
    /// # Errors
    ///
    /// Returns error if the request fails.
    #[instrument(skip(self), fields(id = %id))]
    pub async fn remove(&self, resource: Resource, id: &str) -> Result<(), ApiError> {
        self.delete(&resource.item_path(id)).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_products(&self) -> Result<Vec<Value>, ApiError> {
        self.list(Resource::Products).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn get_product(&self, id: &str) -> Result<Value, ApiError> {
        self.fetch(Resource::Products, id).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn create_product(&self, body: &Value) -> Result<Value, ApiError> {
        self.create(Resource::Products, body).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn update_product(&self, id: &str, body: &Value) -> Result<Value, ApiError> {
        self.update(Resource::Products, id, body).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn delete_product(&self, id: &str) -> Result<(), ApiError> {
        self.remove(Resource::Products, id).await
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_categories(&self) -> Result<Vec<Value>, ApiError> {
        self.list(Resource::Categories).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn get_category(&self, id: &str) -> Result<Value, ApiError> {
        self.fetch(Resource::Categories, id).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn create_category(&self, body: &Value) -> Result<Value, ApiError> {
        self.create(Resource::Categories, body).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn update_category(&self, id: &str, body: &Value) -> Result<Value, ApiError> {
        self.update(Resource::Categories, id, body).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn delete_category(&self, id: &str) -> Result<(), ApiError> {
        self.remove(Resource::Categories, id).await
    }

    // =========================================================================
    // Packages
    // =========================================================================

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_packages(&self) -> Result<Vec<Value>, ApiError> {
        self.list(Resource::Packages).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn get_package(&self, id: &str) -> Result<Value, ApiError> {
        self.fetch(Resource::Packages, id).await
    }

    /// Look a package up by tracking code on the server.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` if no package has the code.
    #[instrument(skip(self), fields(tracking_code = %code))]
    pub async fn get_package_by_tracking_code(&self, code: &str) -> Result<Value, ApiError> {
        let path = format!("{}/track/{}", Resource::Packages.path(), urlencoding::encode(code.trim()));
        self.get(&path).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn create_package(&self, body: &Value) -> Result<Value, ApiError> {
        self.create(Resource::Packages, body).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn update_package(&self, id: &str, body: &Value) -> Result<Value, ApiError> {
        self.update(Resource::Packages, id, body).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn delete_package(&self, id: &str) -> Result<(), ApiError> {
        self.remove(Resource::Packages, id).await
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn list_orders(&self) -> Result<Vec<Value>, ApiError> {
        self.list(Resource::Orders).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn get_order(&self, id: &str) -> Result<Value, ApiError> {
        self.fetch(Resource::Orders, id).await
    }

    /// # Errors
    ///
    /// Returns error if the request fails.
    pub async fn create_order(&self, body: &Value) -> Result<Value, ApiError> {
        self.create(Resource::Orders, body).await
    }
}

const fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_paths() {
        assert_eq!(Resource::Products.path(), "/products");
        assert_eq!(Resource::Categories.path(), "/categories");
        assert_eq!(Resource::Packages.path(), "/packages");
        assert_eq!(Resource::Orders.path(), "/orders");
    }

    #[test]
    fn test_item_path_is_encoded() {
        assert_eq!(Resource::Products.item_path("a b/c"), "/products/a%20b%2Fc");
    }

    #[test]
    fn test_json_kind() {
        assert_eq!(json_kind(&Value::Null), "null");
        assert_eq!(json_kind(&serde_json::json!({})), "an object");
    }
}
