//! Session state.
//!
//! A [`Storefront`] owns one catalog store, one cart and the brand settings
//! for the lifetime of a session. Callers construct it once and pass it by
//! reference to whatever handles user actions.

use preorder_core::ProductId;
use tracing::{info, instrument};

use crate::api::ApiClient;
use crate::cart::CartStore;
use crate::catalog::{CatalogBackend, CatalogStore, LoadReport, LocalBackend, RemoteBackend};
use crate::checkout::Checkout;
use crate::config::{BackendKind, BrandConfig, StorefrontConfig};
use crate::error::{CatalogError, Result};
use crate::models::{CustomOrderRequest, Order};
use crate::storage::LocalStorage;

/// Stores and settings for one session.
#[derive(Debug)]
pub struct Storefront {
    brand: BrandConfig,
    catalog: CatalogStore,
    cart: CartStore,
}

impl Storefront {
    /// Build a session from configuration.
    ///
    /// The cart is always kept in the data directory. The catalog is backed
    /// by the REST API or by JSON files there, per `config.backend`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Gateway` if the HTTP client cannot be built, or
    /// `CatalogError::Storage` if the local catalog cannot be seeded.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage = LocalStorage::new(&config.data_dir);

        let backend: Box<dyn CatalogBackend> = match config.backend {
            BackendKind::Remote => Box::new(RemoteBackend::new(ApiClient::new(&config.api)?)),
            BackendKind::Local => Box::new(LocalBackend::open(storage.clone())?),
        };
        info!(
            backend = backend.name(),
            data_dir = %config.data_dir.display(),
            "Storefront session created"
        );

        Ok(Self::with_parts(
            config.brand,
            CatalogStore::new(backend),
            CartStore::open(storage),
        ))
    }

    /// Assemble a session from already-built stores.
    #[must_use]
    pub const fn with_parts(brand: BrandConfig, catalog: CatalogStore, cart: CartStore) -> Self {
        Self {
            brand,
            catalog,
            cart,
        }
    }

    /// Fetch the catalog collections.
    pub async fn load(&mut self) -> LoadReport {
        self.catalog.load().await
    }

    #[must_use]
    pub const fn brand(&self) -> &BrandConfig {
        &self.brand
    }

    #[must_use]
    pub const fn catalog(&self) -> &CatalogStore {
        &self.catalog
    }

    pub const fn catalog_mut(&mut self) -> &mut CatalogStore {
        &mut self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    pub const fn cart_mut(&mut self) -> &mut CartStore {
        &mut self.cart
    }

    /// Add a catalog product to the cart.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::NotFound` if the product is not in the catalog.
    pub fn add_to_cart(&mut self, product_id: &ProductId, quantity: u32) -> Result<()> {
        let product = self
            .catalog
            .find_product_by_id(product_id)
            .ok_or_else(|| CatalogError::NotFound {
                entity: "product",
                id: product_id.to_string(),
            })?;
        self.cart.add_item(product, quantity);
        Ok(())
    }

    /// Compose the cart order and empty the cart.
    ///
    /// With `record`, the order is also sent to the backend first; the cart
    /// is kept if that fails.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for an empty cart, or the backend
    /// error if recording fails.
    #[instrument(skip(self), fields(lines = self.cart.items().len()))]
    pub async fn checkout_cart(&mut self, record: bool) -> Result<(Checkout, Option<Order>)> {
        let checkout = Checkout::from_cart(self.cart.items(), &self.brand)?;
        let order = self.record(&checkout, record).await?;
        self.cart.clear();
        Ok((checkout, order))
    }

    /// Compose a custom order request.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Validation` for an incomplete request, or the
    /// backend error if recording fails.
    #[instrument(skip(self, request))]
    pub async fn custom_order(
        &self,
        request: &CustomOrderRequest,
        record: bool,
    ) -> Result<(Checkout, Option<Order>)> {
        let checkout = Checkout::custom(request, &self.brand)?;
        let order = self.record(&checkout, record).await?;
        Ok((checkout, order))
    }

    async fn record(&self, checkout: &Checkout, record: bool) -> Result<Option<Order>> {
        if !record {
            return Ok(None);
        }
        let order = self.catalog.backend().create_order(&checkout.order).await?;
        info!(order_id = %order.id, kind = %order.kind, "Order recorded");
        Ok(Some(order))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use preorder_core::CurrencyCode;
    use rust_decimal::Decimal;

    use super::*;

    fn local_session(dir: &std::path::Path) -> Storefront {
        let storage = LocalStorage::new(dir);
        let backend = LocalBackend::open(storage.clone()).unwrap();
        Storefront::with_parts(
            BrandConfig {
                name: "Brand".to_string(),
                whatsapp_number: "233201234567".to_string(),
                currency: CurrencyCode::GHS,
            },
            CatalogStore::new(Box::new(backend)),
            CartStore::open(storage),
        )
    }

    #[tokio::test]
    async fn test_checkout_records_and_clears_cart() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = local_session(dir.path());
        assert!(session.load().await.is_complete());

        let id = session.catalog().products().first().unwrap().id.clone();
        session.add_to_cart(&id, 2).unwrap();
        let subtotal = session.cart().subtotal();

        let (checkout, order) = session.checkout_cart(true).await.unwrap();
        let order = order.unwrap();
        assert_eq!(order.total, subtotal);
        assert_eq!(order.message, checkout.message);
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_without_record() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = local_session(dir.path());
        session.load().await;

        let id = session.catalog().products().first().unwrap().id.clone();
        session.add_to_cart(&id, 1).unwrap();
        let (checkout, order) = session.checkout_cart(false).await.unwrap();
        assert!(order.is_none());
        assert!(checkout.url.starts_with("https://wa.me/233201234567?text="));
    }

    #[tokio::test]
    async fn test_empty_cart_checkout_is_refused() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = local_session(dir.path());
        let err = session.checkout_cart(true).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_unknown_product_is_not_added() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = local_session(dir.path());
        let err = session.add_to_cart(&ProductId::new("nope"), 1).unwrap_err();
        assert!(err.is_not_found());
        assert!(session.cart().is_empty());
    }

    #[tokio::test]
    async fn test_custom_order_total_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let session = local_session(dir.path());
        let request = CustomOrderRequest {
            product_link: "https://shop.example.com/item".to_string(),
            description: "Red".to_string(),
            quantity: 2,
            country: "Ghana".to_string(),
            reference_image: None,
        };
        let (_, order) = session.custom_order(&request, true).await.unwrap();
        assert_eq!(order.unwrap().total, Decimal::ZERO);
    }
}
