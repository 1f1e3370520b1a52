//! Persistence strategies behind the catalog store.
//!
//! [`RemoteBackend`] goes through the REST API and maps responses.
//! [`LocalBackend`] reads and rewrites JSON files in the data directory and
//! assigns identifiers and timestamps itself.

use async_trait::async_trait;
use chrono::Utc;
use preorder_core::{CategoryId, OrderId, PackageId, ProductId};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::seed::{seed_categories, seed_products};
use crate::api::conversions::{
    MappingError, category_from_wire, category_patch_to_wire, new_category_to_wire,
    new_order_to_wire, new_package_to_wire, new_product_to_wire, order_from_wire,
    package_from_wire, package_patch_to_wire, product_from_wire, product_patch_to_wire,
};
use crate::api::{ApiClient, ApiError};
use crate::error::{CatalogError, Result};
use crate::models::{
    Category, CategoryPatch, NewCategory, NewOrder, NewPackage, NewProduct, Order, Package,
    PackagePatch, Product, ProductPatch,
};
use crate::storage::{LocalStorage, StorageKey};

/// Persistence contract shared by every catalog backing.
///
/// Inputs arrive already validated. Every method returns the stored
/// representation, which the store treats as authoritative.
#[async_trait]
pub trait CatalogBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn create_product(&self, input: &NewProduct) -> Result<Product>;
    async fn update_product(&self, id: &ProductId, patch: &ProductPatch) -> Result<Product>;
    async fn delete_product(&self, id: &ProductId) -> Result<()>;

    async fn list_categories(&self) -> Result<Vec<Category>>;
    async fn create_category(&self, input: &NewCategory) -> Result<Category>;
    async fn update_category(&self, id: &CategoryId, patch: &CategoryPatch) -> Result<Category>;
    async fn delete_category(&self, id: &CategoryId) -> Result<()>;

    async fn list_packages(&self) -> Result<Vec<Package>>;
    async fn create_package(&self, input: &NewPackage) -> Result<Package>;
    async fn update_package(&self, id: &PackageId, patch: &PackagePatch) -> Result<Package>;
    async fn delete_package(&self, id: &PackageId) -> Result<()>;

    /// Look a package up by tracking code without consulting local state.
    ///
    /// Returns `Ok(None)` when no package has the code.
    async fn track_package(&self, code: &str) -> Result<Option<Package>>;

    /// Record a checked-out order.
    async fn create_order(&self, input: &NewOrder) -> Result<Order>;
}

// =============================================================================
// Remote
// =============================================================================

/// Backend that talks to the REST API.
#[derive(Debug, Clone)]
pub struct RemoteBackend {
    client: ApiClient,
}

impl RemoteBackend {
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    #[must_use]
    pub const fn client(&self) -> &ApiClient {
        &self.client
    }
}

/// Map a listed collection, skipping records the mapper rejects.
fn map_all<T>(
    collection: &'static str,
    items: &[Value],
    convert: fn(&Value) -> std::result::Result<T, MappingError>,
) -> Vec<T> {
    items
        .iter()
        .filter_map(|item| match convert(item) {
            Ok(mapped) => Some(mapped),
            Err(e) => {
                warn!(
                    collection,
                    id = item.get("id").and_then(serde_json::Value::as_str).unwrap_or("?"),
                    error = %e,
                    "Skipping malformed record"
                );
                None
            }
        })
        .collect()
}

#[async_trait]
impl CatalogBackend for RemoteBackend {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        Ok(map_all("products", &self.client.list_products().await?, product_from_wire))
    }

    async fn create_product(&self, input: &NewProduct) -> Result<Product> {
        let body = new_product_to_wire(input, self.client.wire_convention());
        Ok(product_from_wire(&self.client.create_product(&body).await?)?)
    }

    async fn update_product(&self, id: &ProductId, patch: &ProductPatch) -> Result<Product> {
        let body = product_patch_to_wire(patch, self.client.wire_convention());
        Ok(product_from_wire(&self.client.update_product(id.as_str(), &body).await?)?)
    }

    async fn delete_product(&self, id: &ProductId) -> Result<()> {
        Ok(self.client.delete_product(id.as_str()).await?)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        Ok(map_all(
            "categories",
            &self.client.list_categories().await?,
            category_from_wire,
        ))
    }

    async fn create_category(&self, input: &NewCategory) -> Result<Category> {
        let body = new_category_to_wire(input, self.client.wire_convention());
        Ok(category_from_wire(&self.client.create_category(&body).await?)?)
    }

    async fn update_category(&self, id: &CategoryId, patch: &CategoryPatch) -> Result<Category> {
        let body = category_patch_to_wire(patch, self.client.wire_convention());
        Ok(category_from_wire(&self.client.update_category(id.as_str(), &body).await?)?)
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<()> {
        Ok(self.client.delete_category(id.as_str()).await?)
    }

    async fn list_packages(&self) -> Result<Vec<Package>> {
        Ok(map_all("packages", &self.client.list_packages().await?, package_from_wire))
    }

    async fn create_package(&self, input: &NewPackage) -> Result<Package> {
        let body = new_package_to_wire(input, self.client.wire_convention());
        Ok(package_from_wire(&self.client.create_package(&body).await?)?)
    }

    async fn update_package(&self, id: &PackageId, patch: &PackagePatch) -> Result<Package> {
        let body = package_patch_to_wire(patch, self.client.wire_convention());
        Ok(package_from_wire(&self.client.update_package(id.as_str(), &body).await?)?)
    }

    async fn delete_package(&self, id: &PackageId) -> Result<()> {
        Ok(self.client.delete_package(id.as_str()).await?)
    }

    async fn track_package(&self, code: &str) -> Result<Option<Package>> {
        match self.client.get_package_by_tracking_code(code).await {
            Ok(value) => Ok(Some(package_from_wire(&value)?)),
            Err(ApiError::NotFound(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn create_order(&self, input: &NewOrder) -> Result<Order> {
        let body = new_order_to_wire(input, self.client.wire_convention());
        Ok(order_from_wire(&self.client.create_order(&body).await?)?)
    }
}

// =============================================================================
// Local
// =============================================================================

/// Backend that keeps the catalog in JSON files.
///
/// Every operation reads the current file and, for mutations, rewrites it.
/// New records are prepended so files list newest first.
#[derive(Debug, Clone)]
pub struct LocalBackend {
    storage: LocalStorage,
}

impl LocalBackend {
    /// Open the backend, writing the demo catalog if the product or
    /// category file has never been written.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if seeding fails.
    #[instrument(skip(storage), fields(dir = %storage.dir().display()))]
    pub fn open(storage: LocalStorage) -> Result<Self> {
        if !storage.exists(StorageKey::Categories) {
            storage.save(StorageKey::Categories, &seed_categories())?;
            info!("Seeded demo categories");
        }
        if !storage.exists(StorageKey::Products) {
            storage.save(StorageKey::Products, &seed_products(Utc::now()))?;
            info!("Seeded demo products");
        }
        Ok(Self { storage })
    }

    #[must_use]
    pub const fn storage(&self) -> &LocalStorage {
        &self.storage
    }

    fn read<T: DeserializeOwned>(&self, key: StorageKey) -> Result<Vec<T>> {
        Ok(self.storage.load(key)?.unwrap_or_default())
    }

    fn write<T: Serialize>(&self, key: StorageKey, items: &[T]) -> Result<()> {
        Ok(self.storage.save(key, items)?)
    }

    fn prepend<T>(&self, key: StorageKey, item: T) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
    {
        let mut items: Vec<T> = self.read(key)?;
        items.insert(0, item.clone());
        self.write(key, &items)?;
        Ok(item)
    }

    fn modify<T, F, E>(
        &self,
        key: StorageKey,
        entity: &'static str,
        id: &str,
        matches: F,
        edit: E,
    ) -> Result<T>
    where
        T: Serialize + DeserializeOwned + Clone,
        F: Fn(&T) -> bool,
        E: FnOnce(&mut T),
    {
        let mut items: Vec<T> = self.read(key)?;
        let item = items
            .iter_mut()
            .find(|item| matches(item))
            .ok_or_else(|| CatalogError::NotFound {
                entity,
                id: id.to_string(),
            })?;
        edit(item);
        let updated = item.clone();
        self.write(key, &items)?;
        Ok(updated)
    }

    fn remove<T, F>(
        &self,
        key: StorageKey,
        entity: &'static str,
        id: &str,
        matches: F,
    ) -> Result<()>
    where
        T: Serialize + DeserializeOwned,
        F: Fn(&T) -> bool,
    {
        let mut items: Vec<T> = self.read(key)?;
        let before = items.len();
        items.retain(|item| !matches(item));
        if items.len() == before {
            return Err(CatalogError::NotFound {
                entity,
                id: id.to_string(),
            });
        }
        self.write(key, &items)
    }
}

#[async_trait]
impl CatalogBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.read(StorageKey::Products)
    }

    async fn create_product(&self, input: &NewProduct) -> Result<Product> {
        let product = input.clone().into_product(ProductId::generate(), Utc::now());
        self.prepend(StorageKey::Products, product)
    }

    async fn update_product(&self, id: &ProductId, patch: &ProductPatch) -> Result<Product> {
        self.modify(StorageKey::Products, "product", id.as_str(), |p: &Product| &p.id == id, |p| {
            patch.apply_to(p);
        })
    }

    async fn delete_product(&self, id: &ProductId) -> Result<()> {
        self.remove(StorageKey::Products, "product", id.as_str(), |p: &Product| &p.id == id)
    }

    async fn list_categories(&self) -> Result<Vec<Category>> {
        self.read(StorageKey::Categories)
    }

    async fn create_category(&self, input: &NewCategory) -> Result<Category> {
        let category = input.clone().into_category(CategoryId::generate());
        self.prepend(StorageKey::Categories, category)
    }

    async fn update_category(&self, id: &CategoryId, patch: &CategoryPatch) -> Result<Category> {
        self.modify(StorageKey::Categories, "category", id.as_str(), |c: &Category| &c.id == id, |c| {
            patch.apply_to(c);
        })
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<()> {
        self.remove(StorageKey::Categories, "category", id.as_str(), |c: &Category| &c.id == id)
    }

    async fn list_packages(&self) -> Result<Vec<Package>> {
        self.read(StorageKey::Packages)
    }

    async fn create_package(&self, input: &NewPackage) -> Result<Package> {
        let package = input.clone().into_package(PackageId::generate(), Utc::now());
        self.prepend(StorageKey::Packages, package)
    }

    async fn update_package(&self, id: &PackageId, patch: &PackagePatch) -> Result<Package> {
        let now = Utc::now();
        self.modify(StorageKey::Packages, "package", id.as_str(), |p: &Package| &p.id == id, |p| {
            patch.apply_to(p, now);
        })
    }

    async fn delete_package(&self, id: &PackageId) -> Result<()> {
        self.remove(StorageKey::Packages, "package", id.as_str(), |p: &Package| &p.id == id)
    }

    async fn track_package(&self, code: &str) -> Result<Option<Package>> {
        let packages: Vec<Package> = self.read(StorageKey::Packages)?;
        Ok(packages.into_iter().find(|p| p.tracking_code.matches(code)))
    }

    async fn create_order(&self, input: &NewOrder) -> Result<Order> {
        let order = Order {
            id: OrderId::generate(),
            kind: input.kind,
            lines: input.lines.clone(),
            total: input.total,
            message: input.message.clone(),
            created_at: Utc::now(),
        };
        debug!(order_id = %order.id, "Recording order locally");
        self.prepend(StorageKey::Orders, order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use preorder_core::{ShippingRoute, TrackingCode};
    use rust_decimal::Decimal;

    use super::*;

    fn open() -> (tempfile::TempDir, LocalBackend) {
        let dir = tempfile::tempdir().unwrap();
        let backend = LocalBackend::open(LocalStorage::new(dir.path())).unwrap();
        (dir, backend)
    }

    #[tokio::test]
    async fn test_open_seeds_demo_catalog() {
        let (_dir, backend) = open();
        assert_eq!(backend.list_products().await.unwrap().len(), 6);
        assert_eq!(backend.list_categories().await.unwrap().len(), 3);
        assert!(backend.list_packages().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_open_does_not_reseed_after_deletes() {
        let (dir, backend) = open();
        for product in backend.list_products().await.unwrap() {
            backend.delete_product(&product.id).await.unwrap();
        }
        let reopened = LocalBackend::open(LocalStorage::new(dir.path())).unwrap();
        assert!(reopened.list_products().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_assigns_id_and_prepends() {
        let (_dir, backend) = open();
        let created = backend
            .create_category(&NewCategory::from_name("Home & Kitchen"))
            .await
            .unwrap();
        assert!(!created.id.is_empty());
        assert_ne!(created.id.as_str(), "1");

        let categories = backend.list_categories().await.unwrap();
        assert_eq!(categories.first().map(|c| &c.id), Some(&created.id));
    }

    #[tokio::test]
    async fn test_update_package_refreshes_updated_at() {
        let (_dir, backend) = open();
        let created = backend
            .create_package(&NewPackage::new(TrackingCode::generate(ShippingRoute::Air)))
            .await
            .unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        let patch = PackagePatch {
            status: Some("Processing".to_string()),
            ..PackagePatch::default()
        };
        let updated = backend.update_package(&created.id, &patch).await.unwrap();

        assert_eq!(updated.status, "Processing");
        assert_eq!(updated.created_at, created.created_at);
        assert!(updated.updated_at > created.updated_at);
    }

    #[tokio::test]
    async fn test_missing_record_is_not_found() {
        let (_dir, backend) = open();
        let err = backend
            .update_product(&ProductId::new("nope"), &ProductPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());

        let err = backend.delete_package(&PackageId::new("nope")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_track_package_is_case_insensitive() {
        let (_dir, backend) = open();
        backend
            .create_package(&NewPackage::new(TrackingCode::new("SEA-000001-ABC")))
            .await
            .unwrap();
        let found = backend.track_package("sea-000001-abc").await.unwrap();
        assert!(found.is_some());
        assert!(backend.track_package("AIR-1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_create_order_is_recorded() {
        let (_dir, backend) = open();
        let order = backend
            .create_order(&NewOrder {
                kind: preorder_core::OrderKind::Cart,
                lines: Vec::new(),
                total: Decimal::new(25, 0),
                message: "Hi".to_string(),
            })
            .await
            .unwrap();
        let stored: Vec<Order> = backend.storage().load(StorageKey::Orders).unwrap().unwrap();
        assert_eq!(stored.first().map(|o| &o.id), Some(&order.id));
    }
}
