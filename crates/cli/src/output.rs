//! Plain-text rendering for command results.

#![allow(clippy::print_stdout)]

use preorder_core::{CurrencyCode, Price};
use preorder_storefront::cart::CartStore;
use preorder_storefront::catalog::DashboardStats;
use preorder_storefront::models::{Category, Order, Package, Product};
use rust_decimal::Decimal;

pub fn line(text: &str) {
    println!("{text}");
}

fn money(amount: Decimal, currency: CurrencyCode) -> String {
    Price::new(amount, currency).display()
}

pub fn product(product: &Product, category: &str, currency: CurrencyCode) {
    let featured = if product.is_featured { " *" } else { "" };
    println!(
        "{}  {}{featured}  {}  [{category}] {} stock {}",
        product.id,
        product.name,
        money(product.price_estimate, currency),
        product.status,
        product.stock,
    );
    if let Some(delivery) = &product.estimated_delivery {
        println!("    delivery: {delivery}");
    }
}

pub fn category(category: &Category, product_count: usize) {
    println!(
        "{}  {} ({})  {product_count} products",
        category.id, category.name, category.slug
    );
}

pub fn package(package: &Package) {
    println!(
        "{}  {}  {}  {} -> {}  at {}",
        package.id,
        package.tracking_code,
        package.status,
        package.origin,
        package.destination,
        package.current_location,
    );
}

pub fn package_detail(package: &Package) {
    println!("Tracking code:    {}", package.tracking_code);
    println!("Status:           {}", package.status);
    println!("Route:            {}", package.shipping_route);
    println!("Current location: {}", package.current_location);
    println!("Origin:           {}", package.origin);
    println!("Destination:      {}", package.destination);
    if let Some(eta) = &package.estimated_delivery {
        println!("Est. delivery:    {eta}");
    }
    println!(
        "Last updated:     {}",
        package.updated_at.format("%Y-%m-%d %H:%M UTC")
    );
}

pub fn cart(cart: &CartStore, currency: CurrencyCode) {
    if cart.is_empty() {
        println!("Cart is empty");
        return;
    }
    for item in cart.items() {
        println!(
            "{}  {} x{}  {}",
            item.product_id,
            item.name,
            item.quantity,
            money(item.line_total(), currency)
        );
    }
    println!(
        "{} items, subtotal {}",
        cart.total_item_count(),
        money(cart.subtotal(), currency)
    );
}

pub fn handoff(message: &str, url: &str, order: Option<&Order>) {
    println!("{message}");
    println!();
    println!("{url}");
    if let Some(order) = order {
        println!("Recorded as order {}", order.id);
    }
}

pub fn dashboard(stats: &DashboardStats, currency: CurrencyCode) {
    println!("Products:        {}", stats.product_count);
    println!("Featured:        {}", stats.featured_count);
    println!("Categories:      {}", stats.category_count);
    println!("Packages:        {}", stats.package_count);
    println!(
        "Inventory value: {}",
        money(stats.inventory_value, currency)
    );
}
