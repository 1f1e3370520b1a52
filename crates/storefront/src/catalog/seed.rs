//! Demo catalog written by the local backend on first use.

use chrono::{DateTime, Utc};
use preorder_core::{CategoryId, ProductId, ProductStatus};
use rust_decimal::Decimal;

use crate::models::{Category, Product};

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    price: i64,
    category_id: &'static str,
    image_url: &'static str,
    is_featured: bool,
    status: ProductStatus,
    estimated_delivery: &'static str,
}

const SEED_CATEGORIES: &[(&str, &str, &str)] = &[
    ("1", "Electronics", "electronics"),
    ("2", "Accessories", "accessories"),
    ("3", "Phone Protection", "phone-protection"),
];

const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct {
        id: "1",
        name: "Premium Wireless Headphones",
        description: "High-quality wireless headphones with noise cancellation and long battery life. Perfect for music lovers and professionals.",
        price: 45,
        category_id: "1",
        image_url: "https://images.unsplash.com/photo-1505740420928-5e560c06d30e?w=500&h=500&fit=crop",
        is_featured: true,
        status: ProductStatus::Preorder,
        estimated_delivery: "15-20 days",
    },
    SeedProduct {
        id: "2",
        name: "Smart Watch Pro",
        description: "Advanced smartwatch with fitness tracking, heart rate monitor, and smartphone integration.",
        price: 120,
        category_id: "1",
        image_url: "https://images.unsplash.com/photo-1523275335684-37898b6baf30?w=500&h=500&fit=crop",
        is_featured: true,
        status: ProductStatus::Preorder,
        estimated_delivery: "10-15 days",
    },
    SeedProduct {
        id: "3",
        name: "USB-C Hub Adapter",
        description: "Multi-port USB-C hub with HDMI, USB 3.0, and SD card reader. Ultra-compact design.",
        price: 25,
        category_id: "2",
        image_url: "https://images.unsplash.com/photo-1625948515291-69613efd103f?w=500&h=500&fit=crop",
        is_featured: false,
        status: ProductStatus::InStock,
        estimated_delivery: "5-7 days",
    },
    SeedProduct {
        id: "4",
        name: "Portable Phone Charger",
        description: "20000mAh portable power bank with fast charging support for multiple devices.",
        price: 18,
        category_id: "2",
        image_url: "https://images.unsplash.com/photo-1609091839311-d5365f9ff1c5?w=500&h=500&fit=crop",
        is_featured: true,
        status: ProductStatus::Preorder,
        estimated_delivery: "12-18 days",
    },
    SeedProduct {
        id: "5",
        name: "Phone Screen Protector",
        description: "Tempered glass screen protector with 9H hardness and anti-fingerprint coating.",
        price: 5,
        category_id: "3",
        image_url: "https://images.unsplash.com/photo-1598327105666-5b89351aff97?w=500&h=500&fit=crop",
        is_featured: false,
        status: ProductStatus::InStock,
        estimated_delivery: "7-10 days",
    },
    SeedProduct {
        id: "6",
        name: "Protective Phone Case",
        description: "Durable silicone phone case with shock absorption and premium finish.",
        price: 12,
        category_id: "3",
        image_url: "https://images.unsplash.com/photo-1592286927505-1def25115558?w=500&h=500&fit=crop",
        is_featured: false,
        status: ProductStatus::InStock,
        estimated_delivery: "5-7 days",
    },
];

/// The three demo categories.
#[must_use]
pub fn seed_categories() -> Vec<Category> {
    SEED_CATEGORIES
        .iter()
        .map(|(id, name, slug)| Category {
            id: CategoryId::new(*id),
            name: (*name).to_string(),
            slug: (*slug).to_string(),
        })
        .collect()
}

/// The six demo products, all stamped with `created_at`.
#[must_use]
pub fn seed_products(created_at: DateTime<Utc>) -> Vec<Product> {
    SEED_PRODUCTS
        .iter()
        .map(|seed| Product {
            id: ProductId::new(seed.id),
            name: seed.name.to_string(),
            description: seed.description.to_string(),
            price_estimate: Decimal::from(seed.price),
            category_id: CategoryId::new(seed.category_id),
            image_url: seed.image_url.to_string(),
            is_featured: seed.is_featured,
            created_at,
            status: seed.status,
            estimated_delivery: Some(seed.estimated_delivery.to_string()),
            stock: 0,
        })
        .collect()
}
