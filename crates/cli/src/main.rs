//! Preorder CLI - Catalog, shipment and cart tools.
//!
//! # Usage
//!
//! ```bash
//! # List featured products
//! po-cli products list --featured 4
//!
//! # Register a package with a generated tracking code
//! po-cli packages add --route air --location "Guangzhou"
//!
//! # Look up a shipment
//! po-cli track SEA-123456-ABCDEFGH
//!
//! # Build the cart and hand it off
//! po-cli cart add <product-id> -q 2
//! po-cli cart checkout --record
//! ```
//!
//! # Commands
//!
//! - `products` / `categories` / `packages` - Catalog and shipment management
//! - `track` - Look up a package by tracking code
//! - `cart` - Cart contents and checkout
//! - `custom-order` - Compose a request for an item not in the catalog
//! - `dashboard` - Catalog statistics
//!
//! Configuration comes from the environment (see `StorefrontConfig`);
//! `--backend` and `--data-dir` override it.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use preorder_core::ShippingRoute;
use preorder_storefront::config::BackendKind;
use preorder_storefront::{Storefront, StorefrontConfig};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod output;

#[derive(Parser)]
#[command(name = "po-cli")]
#[command(author, version, about = "Preorder storefront CLI")]
struct Cli {
    /// Catalog backing (`remote` or `local`), overriding `STOREFRONT_BACKEND`
    #[arg(long, global = true)]
    backend: Option<BackendKind>,

    /// Data directory, overriding `STOREFRONT_DATA_DIR`
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductAction,
    },
    /// Manage categories
    Categories {
        #[command(subcommand)]
        action: CategoryAction,
    },
    /// Manage shipment records
    Packages {
        #[command(subcommand)]
        action: PackageAction,
    },
    /// Look up a package by tracking code
    Track {
        /// Tracking code (case-insensitive)
        code: String,
    },
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Compose a custom order request
    CustomOrder(CustomOrderArgs),
    /// Show catalog statistics
    Dashboard,
}

#[derive(Subcommand)]
enum ProductAction {
    /// List products
    List {
        /// Case-insensitive search over name and description
        #[arg(short, long)]
        search: Option<String>,

        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only the first N featured products
        #[arg(long, value_name = "N")]
        featured: Option<usize>,
    },
    /// Add a product
    Add(ProductArgs),
    /// Update a product
    Update {
        /// Product ID
        id: String,

        #[command(flatten)]
        fields: ProductPatchArgs,
    },
    /// Delete a product
    Delete {
        /// Product ID
        id: String,
    },
}

#[derive(Args)]
struct ProductArgs {
    /// Product name
    #[arg(short, long)]
    name: String,

    /// Price estimate
    #[arg(short, long)]
    price: Decimal,

    /// Category ID
    #[arg(short, long)]
    category: String,

    /// Image URL
    #[arg(short, long)]
    image: String,

    /// Description
    #[arg(short, long, default_value = "")]
    description: String,

    /// Show on the home page
    #[arg(long)]
    featured: bool,

    /// `in_stock` or `preorder`
    #[arg(long, default_value = "in_stock")]
    status: preorder_core::ProductStatus,

    /// Estimated delivery window, e.g. "2-3 weeks"
    #[arg(long)]
    delivery: Option<String>,

    /// Units in stock
    #[arg(long, default_value_t = 0)]
    stock: u32,
}

#[derive(Args)]
struct ProductPatchArgs {
    #[arg(short, long)]
    name: Option<String>,
    #[arg(short, long)]
    price: Option<Decimal>,
    #[arg(short, long)]
    category: Option<String>,
    #[arg(short, long)]
    image: Option<String>,
    #[arg(short, long)]
    description: Option<String>,
    #[arg(long)]
    featured: Option<bool>,
    #[arg(long)]
    status: Option<preorder_core::ProductStatus>,
    #[arg(long)]
    delivery: Option<String>,
    #[arg(long)]
    stock: Option<u32>,
}

#[derive(Subcommand)]
enum CategoryAction {
    /// List categories with product counts
    List,
    /// Add a category
    Add {
        /// Category name
        name: String,

        /// URL slug (derived from the name if omitted)
        #[arg(short, long)]
        slug: Option<String>,
    },
    /// Rename a category or change its slug
    Update {
        /// Category ID
        id: String,

        /// New name (the slug follows unless given)
        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        slug: Option<String>,
    },
    /// Delete a category that no product uses
    Delete {
        /// Category ID
        id: String,
    },
}

#[derive(Subcommand)]
enum PackageAction {
    /// List packages
    List {
        /// Case-insensitive search over tracking code and location
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Register a package
    Add(PackageArgs),
    /// Update a package
    Update {
        /// Package ID
        id: String,

        #[command(flatten)]
        fields: PackagePatchArgs,
    },
    /// Delete a package
    Delete {
        /// Package ID
        id: String,
    },
    /// Print a fresh tracking code
    GenerateCode {
        /// `sea` or `air`
        #[arg(short, long, default_value = "sea")]
        route: ShippingRoute,
    },
}

#[derive(Args)]
struct PackageArgs {
    /// Tracking code (generated if omitted)
    #[arg(short, long)]
    code: Option<String>,

    /// `sea` or `air`
    #[arg(short, long, default_value = "sea")]
    route: ShippingRoute,

    /// Status text
    #[arg(short, long)]
    status: Option<String>,

    /// Current location
    #[arg(short, long)]
    location: Option<String>,

    #[arg(long)]
    origin: Option<String>,

    #[arg(long)]
    destination: Option<String>,

    /// Estimated delivery date
    #[arg(long)]
    delivery: Option<String>,
}

#[derive(Args)]
struct PackagePatchArgs {
    #[arg(short, long)]
    code: Option<String>,
    #[arg(short, long)]
    route: Option<ShippingRoute>,
    #[arg(short, long)]
    status: Option<String>,
    #[arg(short, long)]
    location: Option<String>,
    #[arg(long)]
    origin: Option<String>,
    #[arg(long)]
    destination: Option<String>,
    #[arg(long)]
    delivery: Option<String>,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart contents and subtotal
    Show,
    /// Add a product
    Add {
        /// Product ID
        product_id: String,

        #[arg(short, long, default_value_t = 1)]
        quantity: u32,
    },
    /// Replace a line's quantity (0 or less removes it)
    Set {
        /// Product ID
        product_id: String,

        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Remove a product
    Remove {
        /// Product ID
        product_id: String,
    },
    /// Empty the cart
    Clear,
    /// Compose the order message and empty the cart
    Checkout {
        /// Also record the order with the backend
        #[arg(long)]
        record: bool,
    },
}

#[derive(Args)]
struct CustomOrderArgs {
    /// Link to the product
    #[arg(short, long)]
    link: String,

    /// Size, color or other details
    #[arg(short, long)]
    description: String,

    #[arg(short, long, default_value_t = 1)]
    quantity: u32,

    /// Shipping country
    #[arg(short, long)]
    country: String,

    /// Reference image URL
    #[arg(short, long)]
    image: Option<String>,

    /// Also record the order with the backend
    #[arg(long)]
    record: bool,
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

/// Install the subscriber. Logs go to stderr so command output stays clean.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "preorder_storefront=info,preorder_cli=info".into());

    let is_json = std::env::var("LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));
    let json_layer = is_json.then(|| {
        tracing_subscriber::fmt::layer()
            .json()
            .flatten_event(true)
            .with_writer(std::io::stderr)
    });
    let text_layer =
        (!is_json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    if let Commands::Packages {
        action: PackageAction::GenerateCode { route },
    } = &cli.command
    {
        commands::shipments::generate_code(*route);
        return Ok(());
    }

    let mut config = StorefrontConfig::from_env()?;
    if let Some(backend) = cli.backend {
        config.backend = backend;
    }
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }

    let mut session = Storefront::new(config)?;
    let report = session.load().await;
    if !report.is_complete() {
        tracing::warn!(
            failed = report.failures.len(),
            "Catalog loaded with missing collections"
        );
    }

    match cli.command {
        Commands::Products { action } => match action {
            ProductAction::List {
                search,
                category,
                featured,
            } => commands::catalog::list_products(&session, search, category, featured),
            ProductAction::Add(args) => commands::catalog::add_product(&mut session, args).await?,
            ProductAction::Update { id, fields } => {
                commands::catalog::update_product(&mut session, &id, fields).await?;
            }
            ProductAction::Delete { id } => {
                commands::catalog::delete_product(&mut session, &id).await?;
            }
        },
        Commands::Categories { action } => match action {
            CategoryAction::List => commands::catalog::list_categories(&session),
            CategoryAction::Add { name, slug } => {
                commands::catalog::add_category(&mut session, name, slug).await?;
            }
            CategoryAction::Update { id, name, slug } => {
                commands::catalog::update_category(&mut session, &id, name, slug).await?;
            }
            CategoryAction::Delete { id } => {
                commands::catalog::delete_category(&mut session, &id).await?;
            }
        },
        Commands::Packages { action } => match action {
            PackageAction::List { search } => commands::shipments::list_packages(&session, search),
            PackageAction::Add(args) => commands::shipments::add_package(&mut session, args).await?,
            PackageAction::Update { id, fields } => {
                commands::shipments::update_package(&mut session, &id, fields).await?;
            }
            PackageAction::Delete { id } => {
                commands::shipments::delete_package(&mut session, &id).await?;
            }
            PackageAction::GenerateCode { route } => commands::shipments::generate_code(route),
        },
        Commands::Track { code } => commands::shipments::track(&session, &code).await?,
        Commands::Cart { action } => match action {
            CartAction::Show => commands::orders::show_cart(&session),
            CartAction::Add {
                product_id,
                quantity,
            } => commands::orders::add_to_cart(&mut session, &product_id, quantity)?,
            CartAction::Set {
                product_id,
                quantity,
            } => commands::orders::set_quantity(&mut session, &product_id, quantity),
            CartAction::Remove { product_id } => {
                commands::orders::remove_from_cart(&mut session, &product_id);
            }
            CartAction::Clear => commands::orders::clear_cart(&mut session),
            CartAction::Checkout { record } => {
                commands::orders::checkout(&mut session, record).await?;
            }
        },
        Commands::CustomOrder(args) => commands::orders::custom_order(&session, args).await?,
        Commands::Dashboard => commands::catalog::dashboard(&session),
    }
    Ok(())
}
