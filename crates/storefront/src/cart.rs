//! Shopping cart store.
//!
//! Holds at most one line per product. The whole cart is written to local
//! storage after every mutation and read back on open; that copy is a
//! convenience cache, so write failures are logged and otherwise ignored.

use preorder_core::ProductId;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::models::{CartItem, Product};
use crate::storage::{LocalStorage, StorageKey};

/// Cart contents for one session.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
    storage: Option<LocalStorage>,
}

impl CartStore {
    /// An empty cart that is never persisted.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Open the cart persisted in `storage`.
    ///
    /// An unreadable cart file is logged and treated as empty.
    #[must_use]
    pub fn open(storage: LocalStorage) -> Self {
        let items = match storage.load::<Vec<CartItem>>(StorageKey::Cart) {
            Ok(items) => items.unwrap_or_default(),
            Err(e) => {
                warn!(error = %e, "Failed to read saved cart, starting empty");
                Vec::new()
            }
        };
        debug!(lines = items.len(), "Cart restored");

        Self {
            items,
            storage: Some(storage),
        }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn get(&self, product_id: &ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| &i.product_id == product_id)
    }

    /// Add `quantity` of a product, merging with an existing line.
    ///
    /// A quantity of 0 is treated as 1.
    pub fn add_item(&mut self, product: &Product, quantity: u32) {
        let quantity = quantity.max(1);
        if let Some(item) = self.items.iter_mut().find(|i| i.product_id == product.id) {
            item.quantity = item.quantity.saturating_add(quantity);
        } else {
            self.items.push(CartItem::from_product(product, quantity));
        }
        self.persist();
    }

    /// Remove a product's line. Unknown products are ignored.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|i| &i.product_id != product_id);
        self.persist();
    }

    /// Replace a line's quantity. Zero or less removes the line.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(product_id);
            return;
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|i| &i.product_id == product_id) {
            item.quantity = quantity;
            self.persist();
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
        self.persist();
    }

    /// Sum of quantities across all lines.
    #[must_use]
    pub fn total_item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    /// Sum of price times quantity across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn persist(&self) {
        let Some(storage) = &self.storage else {
            return;
        };
        if let Err(e) = storage.save(StorageKey::Cart, &self.items) {
            warn!(error = %e, "Failed to save cart");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use chrono::Utc;
    use preorder_core::{CategoryId, ProductStatus};

    use super::*;
    use crate::models::NewProduct;

    fn product(id: &str, name: &str, price: i64) -> Product {
        NewProduct {
            name: name.to_string(),
            description: String::new(),
            price_estimate: Decimal::from(price),
            category_id: CategoryId::new("1"),
            image_url: format!("https://img.example.com/{id}.jpg"),
            is_featured: false,
            status: ProductStatus::InStock,
            estimated_delivery: None,
            stock: 0,
        }
        .into_product(ProductId::new(id), Utc::now())
    }

    #[test]
    fn test_adding_twice_merges_lines() {
        let mut cart = CartStore::in_memory();
        let x = product("x", "X", 10);
        cart.add_item(&x, 1);
        cart.add_item(&x, 1);

        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.get(&x.id).unwrap().quantity, 2);
    }

    #[test]
    fn test_subtotal_and_count() {
        let mut cart = CartStore::in_memory();
        cart.add_item(&product("a", "A", 10), 2);
        cart.add_item(&product("b", "B", 5), 1);

        assert_eq!(cart.subtotal(), Decimal::from(25));
        assert_eq!(cart.total_item_count(), 3);
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = CartStore::in_memory();
        let a = product("a", "A", 10);
        cart.add_item(&a, 3);
        cart.set_quantity(&a.id, 0);
        assert!(cart.get(&a.id).is_none());

        cart.add_item(&a, 3);
        cart.set_quantity(&a.id, -4);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_set_quantity_replaces() {
        let mut cart = CartStore::in_memory();
        let a = product("a", "A", 10);
        cart.add_item(&a, 3);
        cart.set_quantity(&a.id, 7);
        assert_eq!(cart.get(&a.id).unwrap().quantity, 7);

        cart.set_quantity(&ProductId::new("missing"), 2);
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_add_zero_counts_as_one() {
        let mut cart = CartStore::in_memory();
        cart.add_item(&product("a", "A", 10), 0);
        assert_eq!(cart.total_item_count(), 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let mut cart = CartStore::in_memory();
        let a = product("a", "A", 10);
        cart.add_item(&a, 1);
        cart.add_item(&product("b", "B", 5), 1);
        cart.remove_item(&a.id);
        assert_eq!(cart.items().len(), 1);
        cart.clear();
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
    }

    #[test]
    fn test_cart_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = CartStore::open(LocalStorage::new(dir.path()));
        cart.add_item(&product("a", "A", 10), 2);
        drop(cart);

        let reopened = CartStore::open(LocalStorage::new(dir.path()));
        assert_eq!(reopened.total_item_count(), 2);
        assert_eq!(reopened.items()[0].name, "A");
    }

    #[test]
    fn test_corrupt_cart_file_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(dir.path());
        std::fs::write(storage.path(StorageKey::Cart), "{").unwrap();
        assert!(CartStore::open(storage).is_empty());
    }
}
