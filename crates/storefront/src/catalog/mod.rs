//! Catalog and shipment store.
//!
//! Holds the session's products, categories and packages in memory. Reads
//! never leave the process. Mutations validate their input, go through the
//! configured [`CatalogBackend`], and update local state only from what the
//! backend returns, so server-assigned fields are always authoritative.
//! A failed mutation leaves local state untouched.

mod backend;
mod seed;

pub use backend::{CatalogBackend, LocalBackend, RemoteBackend};
pub use seed::{seed_categories, seed_products};

use std::collections::HashSet;
use std::fmt;

use preorder_core::{CategoryId, PackageId, ProductId};
use rust_decimal::Decimal;
use tracing::{debug, info, instrument, warn};

use crate::error::{CatalogError, Result};
use crate::models::{
    Category, CategoryPatch, NewCategory, NewPackage, NewProduct, Package, PackagePatch, Product,
    ProductPatch,
};

/// Label shown for products whose category does not resolve.
pub const UNCATEGORIZED: &str = "Uncategorized";

/// One of the three collections loaded at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Categories,
    Packages,
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Products => "products",
            Self::Categories => "categories",
            Self::Packages => "packages",
        })
    }
}

/// Outcome of the startup fan-out.
///
/// Each collection loads independently; a failed collection stays empty.
#[derive(Debug, Default)]
pub struct LoadReport {
    pub failures: Vec<(Collection, CatalogError)>,
}

impl LoadReport {
    /// Whether every collection loaded.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Whether a specific collection failed.
    #[must_use]
    pub fn failed(&self, collection: Collection) -> bool {
        self.failures.iter().any(|(c, _)| *c == collection)
    }
}

/// Outcome of a category deletion request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryDeletion {
    /// The backend deleted the category and it was removed locally.
    Deleted,
    /// Products still reference the category; the backend was not called.
    Blocked { product_count: usize },
    /// Products have not been loaded, so references cannot be checked; the
    /// backend was not called.
    Unverified,
}

/// Headline numbers for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    pub product_count: usize,
    pub category_count: usize,
    pub package_count: usize,
    pub featured_count: usize,
    /// Sum of price estimate times stock over all products.
    pub inventory_value: Decimal,
}

/// In-memory catalog for one session.
pub struct CatalogStore {
    backend: Box<dyn CatalogBackend>,
    products: Vec<Product>,
    categories: Vec<Category>,
    packages: Vec<Package>,
    /// Collections whose last fetch succeeded. `None` until the first load
    /// finishes.
    loaded: Option<HashSet<Collection>>,
}

impl CatalogStore {
    /// An empty store over a backend. Call [`load`](Self::load) to populate it.
    #[must_use]
    pub fn new(backend: Box<dyn CatalogBackend>) -> Self {
        Self {
            backend,
            products: Vec::new(),
            categories: Vec::new(),
            packages: Vec::new(),
            loaded: None,
        }
    }

    #[must_use]
    pub fn backend(&self) -> &dyn CatalogBackend {
        self.backend.as_ref()
    }

    /// Fetch all three collections concurrently.
    ///
    /// Never fails as a whole: each collection that fails is logged, left
    /// empty and reported in the returned [`LoadReport`].
    #[instrument(skip(self), fields(backend = self.backend.name()))]
    pub async fn load(&mut self) -> LoadReport {
        let (products, categories, packages) = tokio::join!(
            self.backend.list_products(),
            self.backend.list_categories(),
            self.backend.list_packages(),
        );

        let mut report = LoadReport::default();
        self.products = settle(products, Collection::Products, &mut report);
        self.categories = settle(categories, Collection::Categories, &mut report);
        self.packages = settle(packages, Collection::Packages, &mut report);
        self.loaded = Some(
            [Collection::Products, Collection::Categories, Collection::Packages]
                .into_iter()
                .filter(|c| !report.failed(*c))
                .collect(),
        );

        info!(
            products = self.products.len(),
            categories = self.categories.len(),
            packages = self.packages.len(),
            failures = report.failures.len(),
            "Catalog loaded"
        );
        report
    }

    /// Whether the store is still waiting for its first load.
    ///
    /// A new store starts out loading; [`load`](Self::load) clears the flag
    /// whether or not every collection succeeded.
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loaded.is_none()
    }

    /// Whether the last load fetched `collection` successfully.
    #[must_use]
    pub fn is_loaded(&self, collection: Collection) -> bool {
        self.loaded
            .as_ref()
            .is_some_and(|loaded| loaded.contains(&collection))
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// Create a product and prepend the stored version.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` without calling the backend if the
    /// input is invalid, or the backend's error if the create fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_product(&mut self, input: NewProduct) -> Result<Product> {
        input.validate()?;
        let product = self.backend.create_product(&input).await?;
        info!(product_id = %product.id, "Product created");
        self.products.insert(0, product.clone());
        Ok(product)
    }

    /// Update a product and merge the stored version into the local entry.
    ///
    /// If the product is not held locally the returned value is the
    /// backend's response and local state is unchanged.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` without calling the backend if a
    /// present field is invalid, or the backend's error if the update fails.
    #[instrument(skip(self, patch), fields(product_id = %id))]
    pub async fn update_product(&mut self, id: &ProductId, patch: &ProductPatch) -> Result<Product> {
        patch.validate()?;
        let mut updated = self.backend.update_product(id, patch).await?;
        if let Some(local) = self.products.iter_mut().find(|p| &p.id == id) {
            updated.created_at = local.created_at;
            *local = updated.clone();
        } else {
            debug!("Updated product is not held locally");
        }
        Ok(updated)
    }

    /// Delete a product. Products have no dependents.
    ///
    /// # Errors
    ///
    /// Returns the backend's error; local state is then unchanged.
    #[instrument(skip(self), fields(product_id = %id))]
    pub async fn delete_product(&mut self, id: &ProductId) -> Result<()> {
        self.backend.delete_product(id).await?;
        self.products.retain(|p| &p.id != id);
        Ok(())
    }

    #[must_use]
    pub fn find_product_by_id(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Products whose name or description contains `term` (ignoring case),
    /// optionally restricted to one category. An empty term matches all.
    #[must_use]
    pub fn search_products(&self, term: &str, category: Option<&CategoryId>) -> Vec<&Product> {
        let term = term.trim().to_lowercase();
        self.products
            .iter()
            .filter(|p| category.is_none_or(|c| &p.category_id == c))
            .filter(|p| {
                term.is_empty()
                    || p.name.to_lowercase().contains(&term)
                    || p.description.to_lowercase().contains(&term)
            })
            .collect()
    }

    /// Up to `limit` featured products in collection order.
    #[must_use]
    pub fn featured_products(&self, limit: usize) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.is_featured)
            .take(limit)
            .collect()
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// # Errors
    ///
    /// Returns `CatalogError::Validation` without calling the backend if the
    /// name or slug is blank, or the backend's error if the create fails.
    #[instrument(skip(self, input), fields(name = %input.name))]
    pub async fn add_category(&mut self, input: NewCategory) -> Result<Category> {
        input.validate()?;
        let category = self.backend.create_category(&input).await?;
        info!(category_id = %category.id, "Category created");
        self.categories.insert(0, category.clone());
        Ok(category)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Validation` without calling the backend if a
    /// present field is blank, or the backend's error if the update fails.
    #[instrument(skip(self, patch), fields(category_id = %id))]
    pub async fn update_category(
        &mut self,
        id: &CategoryId,
        patch: &CategoryPatch,
    ) -> Result<Category> {
        patch.validate()?;
        let updated = self.backend.update_category(id, patch).await?;
        if let Some(local) = self.categories.iter_mut().find(|c| &c.id == id) {
            *local = updated.clone();
        }
        Ok(updated)
    }

    /// Delete a category unless products still reference it.
    ///
    /// A blocked deletion is not an error and never reaches the backend.
    /// Neither does a deletion while the products collection is not loaded,
    /// since references cannot be counted.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the delete itself fails.
    #[instrument(skip(self), fields(category_id = %id))]
    pub async fn delete_category(&mut self, id: &CategoryId) -> Result<CategoryDeletion> {
        if !self.is_loaded(Collection::Products) {
            warn!("Category deletion refused, products are not loaded");
            return Ok(CategoryDeletion::Unverified);
        }
        let product_count = self.category_product_count(id);
        if product_count > 0 {
            warn!(product_count, "Category deletion blocked by products");
            return Ok(CategoryDeletion::Blocked { product_count });
        }

        self.backend.delete_category(id).await?;
        self.categories.retain(|c| &c.id != id);
        Ok(CategoryDeletion::Deleted)
    }

    #[must_use]
    pub fn find_category_by_id(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| &c.id == id)
    }

    /// Number of products referencing a category.
    #[must_use]
    pub fn category_product_count(&self, id: &CategoryId) -> usize {
        self.products.iter().filter(|p| &p.category_id == id).count()
    }

    /// Display name of a product's category, or [`UNCATEGORIZED`].
    #[must_use]
    pub fn category_name_for(&self, product: &Product) -> &str {
        self.find_category_by_id(&product.category_id)
            .map_or(UNCATEGORIZED, |c| c.name.as_str())
    }

    // =========================================================================
    // Packages
    // =========================================================================

    /// # Errors
    ///
    /// Returns `CatalogError::Validation` without calling the backend if the
    /// tracking code, status or location is blank, or the backend's error.
    #[instrument(skip(self, input), fields(tracking_code = %input.tracking_code))]
    pub async fn add_package(&mut self, input: NewPackage) -> Result<Package> {
        input.validate()?;
        let package = self.backend.create_package(&input).await?;
        info!(package_id = %package.id, "Package created");
        self.packages.insert(0, package.clone());
        Ok(package)
    }

    /// # Errors
    ///
    /// Returns `CatalogError::Validation` without calling the backend if a
    /// present field is blank, or the backend's error if the update fails.
    #[instrument(skip(self, patch), fields(package_id = %id))]
    pub async fn update_package(&mut self, id: &PackageId, patch: &PackagePatch) -> Result<Package> {
        patch.validate()?;
        let mut updated = self.backend.update_package(id, patch).await?;
        if let Some(local) = self.packages.iter_mut().find(|p| &p.id == id) {
            updated.created_at = local.created_at;
            *local = updated.clone();
        }
        Ok(updated)
    }

    /// # Errors
    ///
    /// Returns the backend's error; local state is then unchanged.
    #[instrument(skip(self), fields(package_id = %id))]
    pub async fn delete_package(&mut self, id: &PackageId) -> Result<()> {
        self.backend.delete_package(id).await?;
        self.packages.retain(|p| &p.id != id);
        Ok(())
    }

    #[must_use]
    pub fn find_package_by_id(&self, id: &PackageId) -> Option<&Package> {
        self.packages.iter().find(|p| &p.id == id)
    }

    /// Case-insensitive exact lookup over the local collection.
    ///
    /// With duplicate codes the first match in collection order wins.
    #[must_use]
    pub fn find_package_by_tracking_code(&self, code: &str) -> Option<&Package> {
        let mut matches = self.packages.iter().filter(|p| p.tracking_code.matches(code));
        let first = matches.next();
        if first.is_some() {
            let extra = matches.count();
            if extra > 0 {
                debug!(tracking_code = %code.trim(), duplicates = extra, "Tracking code is not unique");
            }
        }
        first
    }

    /// Look a tracking code up locally, then ask the backend.
    ///
    /// A blank code is a miss and never reaches the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend's error if the fallback lookup fails.
    #[instrument(skip(self), fields(tracking_code = %code))]
    pub async fn track(&self, code: &str) -> Result<Option<Package>> {
        if code.trim().is_empty() {
            return Ok(None);
        }
        if let Some(package) = self.find_package_by_tracking_code(code) {
            return Ok(Some(package.clone()));
        }
        self.backend.track_package(code).await
    }

    /// Packages whose tracking code or current location contains `term`,
    /// ignoring case. An empty term matches all.
    #[must_use]
    pub fn search_packages(&self, term: &str) -> Vec<&Package> {
        let term = term.trim().to_lowercase();
        self.packages
            .iter()
            .filter(|p| {
                term.is_empty()
                    || p.tracking_code.contains(&term)
                    || p.current_location.to_lowercase().contains(&term)
            })
            .collect()
    }

    // =========================================================================
    // Dashboard
    // =========================================================================

    #[must_use]
    pub fn dashboard_stats(&self) -> DashboardStats {
        DashboardStats {
            product_count: self.products.len(),
            category_count: self.categories.len(),
            package_count: self.packages.len(),
            featured_count: self.products.iter().filter(|p| p.is_featured).count(),
            inventory_value: self
                .products
                .iter()
                .map(|p| p.price_estimate * Decimal::from(p.stock))
                .sum(),
        }
    }
}

impl fmt::Debug for CatalogStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogStore")
            .field("backend", &self.backend.name())
            .field("products", &self.products.len())
            .field("categories", &self.categories.len())
            .field("packages", &self.packages.len())
            .field("loaded", &self.loaded)
            .finish()
    }
}

fn settle<T>(result: Result<Vec<T>>, collection: Collection, report: &mut LoadReport) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            warn!(collection = %collection, error = %e, "Failed to load collection");
            report.failures.push((collection, e));
            Vec::new()
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::{Duration, Utc};
    use preorder_core::{OrderId, ProductStatus, TrackingCode};

    use super::*;
    use crate::api::ApiError;
    use crate::models::{NewOrder, Order, ValidationError};

    /// In-memory backend that counts calls and can fail per collection.
    #[derive(Default)]
    struct FakeBackend {
        products: Mutex<Vec<Product>>,
        categories: Mutex<Vec<Category>>,
        packages: Mutex<Vec<Package>>,
        fail_categories: bool,
        fail_products: bool,
        fail_mutations: bool,
        calls: AtomicUsize,
        next_id: AtomicUsize,
    }

    impl FakeBackend {
        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }

        fn hit(&self) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_mutations {
                return Err(ApiError::Api {
                    status: 500,
                    message: "boom".to_string(),
                }
                .into());
            }
            Ok(())
        }

        fn id(&self) -> String {
            format!("srv-{}", self.next_id.fetch_add(1, Ordering::SeqCst) + 1)
        }
    }

    #[async_trait]
    impl CatalogBackend for std::sync::Arc<FakeBackend> {
        fn name(&self) -> &'static str {
            "fake"
        }

        async fn list_products(&self) -> Result<Vec<Product>> {
            if self.fail_products {
                return Err(ApiError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                }
                .into());
            }
            Ok(self.products.lock().unwrap().clone())
        }

        async fn create_product(&self, input: &NewProduct) -> Result<Product> {
            self.hit()?;
            // Server normalizes names.
            let mut product = input.clone().into_product(ProductId::new(self.id()), Utc::now());
            product.name = product.name.trim().to_string();
            Ok(product)
        }

        async fn update_product(&self, id: &ProductId, patch: &ProductPatch) -> Result<Product> {
            self.hit()?;
            let mut product = self
                .products
                .lock()
                .unwrap()
                .iter()
                .find(|p| &p.id == id)
                .cloned()
                .unwrap_or_else(|| product("ghost", "1"));
            patch.apply_to(&mut product);
            product.created_at = Utc::now();
            Ok(product)
        }

        async fn delete_product(&self, _id: &ProductId) -> Result<()> {
            self.hit()
        }

        async fn list_categories(&self) -> Result<Vec<Category>> {
            if self.fail_categories {
                return Err(ApiError::Api {
                    status: 503,
                    message: "unavailable".to_string(),
                }
                .into());
            }
            Ok(self.categories.lock().unwrap().clone())
        }

        async fn create_category(&self, input: &NewCategory) -> Result<Category> {
            self.hit()?;
            Ok(input.clone().into_category(CategoryId::new(self.id())))
        }

        async fn update_category(&self, id: &CategoryId, patch: &CategoryPatch) -> Result<Category> {
            self.hit()?;
            let mut category = NewCategory::from_name("x").into_category(id.clone());
            patch.apply_to(&mut category);
            Ok(category)
        }

        async fn delete_category(&self, _id: &CategoryId) -> Result<()> {
            self.hit()
        }

        async fn list_packages(&self) -> Result<Vec<Package>> {
            Ok(self.packages.lock().unwrap().clone())
        }

        async fn create_package(&self, input: &NewPackage) -> Result<Package> {
            self.hit()?;
            Ok(input.clone().into_package(PackageId::new(self.id()), Utc::now()))
        }

        async fn update_package(&self, id: &PackageId, patch: &PackagePatch) -> Result<Package> {
            self.hit()?;
            let mut package = NewPackage::new(TrackingCode::new("X")).into_package(id.clone(), Utc::now());
            patch.apply_to(&mut package, Utc::now());
            Ok(package)
        }

        async fn delete_package(&self, _id: &PackageId) -> Result<()> {
            self.hit()
        }

        async fn track_package(&self, code: &str) -> Result<Option<Package>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
                .packages
                .lock()
                .unwrap()
                .iter()
                .find(|p| p.tracking_code.matches(code))
                .cloned())
        }

        async fn create_order(&self, input: &NewOrder) -> Result<Order> {
            self.hit()?;
            Ok(Order {
                id: OrderId::new(self.id()),
                kind: input.kind,
                lines: input.lines.clone(),
                total: input.total,
                message: input.message.clone(),
                created_at: Utc::now(),
            })
        }
    }

    fn product(id: &str, category: &str) -> Product {
        NewProduct {
            name: format!("Product {id}"),
            description: String::new(),
            price_estimate: Decimal::new(10, 0),
            category_id: CategoryId::new(category),
            image_url: "https://img.example.com/p.jpg".to_string(),
            is_featured: false,
            status: ProductStatus::InStock,
            estimated_delivery: None,
            stock: 0,
        }
        .into_product(ProductId::new(id), Utc::now() - Duration::days(1))
    }

    fn package(id: &str, code: &str) -> Package {
        NewPackage::new(TrackingCode::new(code)).into_package(PackageId::new(id), Utc::now())
    }

    fn new_product() -> NewProduct {
        NewProduct {
            name: "  Smart Watch Pro ".to_string(),
            description: "Fitness tracking".to_string(),
            price_estimate: Decimal::new(120, 0),
            category_id: CategoryId::new("1"),
            image_url: "https://img.example.com/watch.jpg".to_string(),
            is_featured: true,
            status: ProductStatus::Preorder,
            estimated_delivery: None,
            stock: 2,
        }
    }

    async fn store_with(backend: FakeBackend) -> (std::sync::Arc<FakeBackend>, CatalogStore, LoadReport) {
        let backend = std::sync::Arc::new(backend);
        let mut store = CatalogStore::new(Box::new(backend.clone()));
        let report = store.load().await;
        (backend, store, report)
    }

    fn seeded() -> FakeBackend {
        FakeBackend {
            products: Mutex::new(vec![product("p1", "1"), product("p2", "1"), product("p3", "2")]),
            categories: Mutex::new(seed_categories()),
            packages: Mutex::new(vec![package("k1", "SEA-000001-ABC"), package("k2", "AIR-000002-XYZ")]),
            ..FakeBackend::default()
        }
    }

    #[test]
    fn test_new_store_is_loading_until_load_finishes() {
        let store = CatalogStore::new(Box::new(std::sync::Arc::new(seeded())));
        assert!(store.is_loading());
        assert!(!store.is_loaded(Collection::Products));
    }

    #[tokio::test]
    async fn test_load_populates_all_collections() {
        let (_backend, store, report) = store_with(seeded()).await;
        assert!(report.is_complete());
        assert!(!store.is_loading());
        assert!(store.is_loaded(Collection::Products));
        assert_eq!(store.products().len(), 3);
        assert_eq!(store.categories().len(), 3);
        assert_eq!(store.packages().len(), 2);
    }

    #[tokio::test]
    async fn test_load_partial_failure_keeps_other_collections() {
        let (_backend, store, report) = store_with(FakeBackend {
            fail_categories: true,
            ..seeded()
        })
        .await;

        assert!(!report.is_complete());
        assert!(report.failed(Collection::Categories));
        assert!(!report.failed(Collection::Products));
        assert!(store.categories().is_empty());
        assert_eq!(store.products().len(), 3);
        assert_eq!(store.packages().len(), 2);
        assert!(!store.is_loading());
        assert!(!store.is_loaded(Collection::Categories));
        assert!(store.is_loaded(Collection::Packages));
    }

    #[tokio::test]
    async fn test_add_product_stores_backend_response() {
        let (_backend, mut store, _) = store_with(seeded()).await;
        let added = store.add_product(new_product()).await.unwrap();

        assert_eq!(added.id.as_str(), "srv-1");
        assert_eq!(added.name, "Smart Watch Pro");
        assert_eq!(store.products()[0], added);
        assert_eq!(store.find_product_by_id(&added.id), Some(&added));
    }

    #[tokio::test]
    async fn test_add_product_validation_skips_backend() {
        let (backend, mut store, _) = store_with(seeded()).await;
        let mut input = new_product();
        input.price_estimate = Decimal::ZERO;

        let err = store.add_product(input).await.unwrap_err();
        assert!(matches!(err, CatalogError::Validation(ValidationError::NonPositivePrice)));
        assert_eq!(backend.calls(), 0);
        assert_eq!(store.products().len(), 3);
    }

    #[tokio::test]
    async fn test_failed_mutation_leaves_state_untouched() {
        let (_backend, mut store, _) = store_with(FakeBackend {
            fail_mutations: true,
            ..seeded()
        })
        .await;

        assert!(store.add_product(new_product()).await.is_err());
        assert!(store.delete_product(&ProductId::new("p1")).await.is_err());
        assert_eq!(store.products().len(), 3);
        assert!(store.find_product_by_id(&ProductId::new("p1")).is_some());
    }

    #[tokio::test]
    async fn test_update_product_keeps_created_at() {
        let (_backend, mut store, _) = store_with(seeded()).await;
        let id = ProductId::new("p1");
        let original = store.find_product_by_id(&id).unwrap().created_at;

        let patch = ProductPatch {
            name: Some("Renamed".to_string()),
            ..ProductPatch::default()
        };
        store.update_product(&id, &patch).await.unwrap();

        let local = store.find_product_by_id(&id).unwrap();
        assert_eq!(local.name, "Renamed");
        assert_eq!(local.created_at, original);
    }

    #[tokio::test]
    async fn test_update_unknown_product_is_local_noop() {
        let (_backend, mut store, _) = store_with(seeded()).await;
        let before = store.products().to_vec();
        store
            .update_product(&ProductId::new("missing"), &ProductPatch::default())
            .await
            .unwrap();
        assert_eq!(store.products(), before.as_slice());
    }

    #[tokio::test]
    async fn test_delete_category_blocked_by_products() {
        let (backend, mut store, _) = store_with(seeded()).await;
        let outcome = store.delete_category(&CategoryId::new("1")).await.unwrap();

        assert_eq!(outcome, CategoryDeletion::Blocked { product_count: 2 });
        assert_eq!(backend.calls(), 0);
        assert_eq!(store.categories().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_category_unverified_without_products() {
        let (backend, mut store, _) = store_with(FakeBackend {
            fail_products: true,
            ..seeded()
        })
        .await;
        let outcome = store.delete_category(&CategoryId::new("3")).await.unwrap();

        assert_eq!(outcome, CategoryDeletion::Unverified);
        assert_eq!(backend.calls(), 0);
        assert_eq!(store.categories().len(), 3);
    }

    #[tokio::test]
    async fn test_delete_category_before_load_is_unverified() {
        let backend = std::sync::Arc::new(seeded());
        let mut store = CatalogStore::new(Box::new(backend.clone()));
        let outcome = store.delete_category(&CategoryId::new("3")).await.unwrap();

        assert_eq!(outcome, CategoryDeletion::Unverified);
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_delete_unused_category() {
        let (backend, mut store, _) = store_with(seeded()).await;
        let outcome = store.delete_category(&CategoryId::new("3")).await.unwrap();

        assert_eq!(outcome, CategoryDeletion::Deleted);
        assert_eq!(backend.calls(), 1);
        assert!(store.find_category_by_id(&CategoryId::new("3")).is_none());
    }

    #[tokio::test]
    async fn test_find_by_tracking_code_ignores_case() {
        let (_backend, store, _) = store_with(seeded()).await;
        let found = store.find_package_by_tracking_code("sea-000001-abc").unwrap();
        assert_eq!(found.id.as_str(), "k1");
        assert!(store.find_package_by_tracking_code("  AIR-000002-xyz ").is_some());
        assert!(store.find_package_by_tracking_code("").is_none());
    }

    #[tokio::test]
    async fn test_duplicate_tracking_codes_return_first() {
        let (_backend, store, _) = store_with(FakeBackend {
            packages: Mutex::new(vec![package("new", "DUP-1"), package("old", "dup-1")]),
            ..FakeBackend::default()
        })
        .await;
        assert_eq!(store.find_package_by_tracking_code("dup-1").unwrap().id.as_str(), "new");
    }

    #[tokio::test]
    async fn test_track_prefers_local() {
        let (backend, store, _) = store_with(seeded()).await;
        assert!(store.track("SEA-000001-ABC").await.unwrap().is_some());
        assert_eq!(backend.calls(), 0);
        assert!(store.track("NOPE").await.unwrap().is_none());
        assert_eq!(backend.calls(), 1);
    }

    #[tokio::test]
    async fn test_track_blank_code_skips_backend() {
        let (backend, store, _) = store_with(seeded()).await;
        assert!(store.track("").await.unwrap().is_none());
        assert!(store.track("   ").await.unwrap().is_none());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_add_package_prepends_and_update_keeps_created_at() {
        let (_backend, mut store, _) = store_with(seeded()).await;
        let added = store
            .add_package(NewPackage::new(TrackingCode::new("AIR-9")))
            .await
            .unwrap();
        assert_eq!(store.packages()[0].id, added.id);

        let patch = PackagePatch {
            status: Some("Delivered".to_string()),
            ..PackagePatch::default()
        };
        let updated = store.update_package(&added.id, &patch).await.unwrap();
        assert_eq!(updated.created_at, added.created_at);
        assert_eq!(store.find_package_by_id(&added.id).unwrap().status, "Delivered");
    }

    #[tokio::test]
    async fn test_package_validation() {
        let (backend, mut store, _) = store_with(seeded()).await;
        let patch = PackagePatch {
            current_location: Some(" ".to_string()),
            ..PackagePatch::default()
        };
        let err = store.update_package(&PackageId::new("k1"), &patch).await.unwrap_err();
        assert!(err.is_validation());
        assert_eq!(backend.calls(), 0);
    }

    #[tokio::test]
    async fn test_search_products() {
        let (_backend, store, _) = store_with(seeded()).await;
        assert_eq!(store.search_products("product p", None).len(), 3);
        assert_eq!(store.search_products("", Some(&CategoryId::new("1"))).len(), 2);
        assert_eq!(store.search_products("P3", Some(&CategoryId::new("1"))).len(), 0);
    }

    #[tokio::test]
    async fn test_search_packages() {
        let (_backend, store, _) = store_with(seeded()).await;
        assert_eq!(store.search_packages("air").len(), 1);
        assert_eq!(store.search_packages("china").len(), 2);
    }

    #[tokio::test]
    async fn test_category_name_for_dangling_reference() {
        let (_backend, store, _) = store_with(seeded()).await;
        let orphan = product("p9", "404");
        assert_eq!(store.category_name_for(&orphan), UNCATEGORIZED);
        let p1 = store.find_product_by_id(&ProductId::new("p1")).unwrap();
        assert_eq!(store.category_name_for(p1), "Electronics");
    }

    #[tokio::test]
    async fn test_featured_and_dashboard_stats() {
        let (_backend, mut store, _) = store_with(seeded()).await;
        store.add_product(new_product()).await.unwrap();

        assert_eq!(store.featured_products(4).len(), 1);
        let stats = store.dashboard_stats();
        assert_eq!(stats.product_count, 4);
        assert_eq!(stats.category_count, 3);
        assert_eq!(stats.package_count, 2);
        assert_eq!(stats.featured_count, 1);
        assert_eq!(stats.inventory_value, Decimal::new(240, 0));
    }
}
