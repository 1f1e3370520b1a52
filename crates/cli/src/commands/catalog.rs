//! Product, category and dashboard commands.

use preorder_core::{CategoryId, ProductId};
use preorder_storefront::Storefront;
use preorder_storefront::catalog::CategoryDeletion;
use preorder_storefront::error::Result;
use preorder_storefront::models::{CategoryPatch, NewCategory, NewProduct, ProductPatch};
use tracing::info;

use crate::output;
use crate::{ProductArgs, ProductPatchArgs};

pub fn list_products(
    session: &Storefront,
    search: Option<String>,
    category: Option<String>,
    featured: Option<usize>,
) {
    let catalog = session.catalog();
    let currency = session.brand().currency;

    let products = match featured {
        Some(limit) => catalog.featured_products(limit),
        None => {
            let category = category.map(CategoryId::new);
            catalog.search_products(search.as_deref().unwrap_or_default(), category.as_ref())
        }
    };

    if products.is_empty() {
        output::line("No products found");
    }
    for product in products {
        output::product(product, catalog.category_name_for(product), currency);
    }
}

pub async fn add_product(session: &mut Storefront, args: ProductArgs) -> Result<()> {
    let input = NewProduct {
        name: args.name,
        description: args.description,
        price_estimate: args.price,
        category_id: CategoryId::new(args.category),
        image_url: args.image,
        is_featured: args.featured,
        status: args.status,
        estimated_delivery: args.delivery,
        stock: args.stock,
    };

    let product = session.catalog_mut().add_product(input).await?;
    let currency = session.brand().currency;
    let catalog = session.catalog();
    output::product(&product, catalog.category_name_for(&product), currency);
    Ok(())
}

pub async fn update_product(
    session: &mut Storefront,
    id: &str,
    fields: ProductPatchArgs,
) -> Result<()> {
    let patch = ProductPatch {
        name: fields.name,
        description: fields.description,
        price_estimate: fields.price,
        category_id: fields.category.map(CategoryId::new),
        image_url: fields.image,
        is_featured: fields.featured,
        status: fields.status,
        estimated_delivery: fields.delivery,
        stock: fields.stock,
    };
    if patch.is_empty() {
        output::line("Nothing to update");
        return Ok(());
    }

    let product = session
        .catalog_mut()
        .update_product(&ProductId::new(id), &patch)
        .await?;
    let currency = session.brand().currency;
    output::product(&product, session.catalog().category_name_for(&product), currency);
    Ok(())
}

pub async fn delete_product(session: &mut Storefront, id: &str) -> Result<()> {
    session
        .catalog_mut()
        .delete_product(&ProductId::new(id))
        .await?;
    output::line(&format!("Deleted product {id}"));
    Ok(())
}

pub fn list_categories(session: &Storefront) {
    let catalog = session.catalog();
    for category in catalog.categories() {
        output::category(category, catalog.category_product_count(&category.id));
    }
}

pub async fn add_category(
    session: &mut Storefront,
    name: String,
    slug: Option<String>,
) -> Result<()> {
    let mut input = NewCategory::from_name(name);
    if let Some(slug) = slug {
        input.slug = slug;
    }

    let category = session.catalog_mut().add_category(input).await?;
    output::category(&category, 0);
    Ok(())
}

pub async fn update_category(
    session: &mut Storefront,
    id: &str,
    name: Option<String>,
    slug: Option<String>,
) -> Result<()> {
    let mut patch = name.map(CategoryPatch::rename).unwrap_or_default();
    if slug.is_some() {
        patch.slug = slug;
    }
    if patch == CategoryPatch::default() {
        output::line("Nothing to update");
        return Ok(());
    }

    let id = CategoryId::new(id);
    let category = session.catalog_mut().update_category(&id, &patch).await?;
    output::category(&category, session.catalog().category_product_count(&id));
    Ok(())
}

pub async fn delete_category(session: &mut Storefront, id: &str) -> Result<()> {
    match session
        .catalog_mut()
        .delete_category(&CategoryId::new(id))
        .await?
    {
        CategoryDeletion::Deleted => output::line(&format!("Deleted category {id}")),
        CategoryDeletion::Blocked { product_count } => {
            info!(category_id = id, product_count, "Category kept");
            output::line(&format!(
                "Cannot delete category {id}: {product_count} products still use it"
            ));
        }
        CategoryDeletion::Unverified => output::line(&format!(
            "Cannot delete category {id}: products could not be loaded to check for references"
        )),
    }
    Ok(())
}

pub fn dashboard(session: &Storefront) {
    output::dashboard(&session.catalog().dashboard_stats(), session.brand().currency);
}
