//! Package and tracking commands.

use preorder_core::{PackageId, ShippingRoute, TrackingCode};
use preorder_storefront::Storefront;
use preorder_storefront::error::Result;
use preorder_storefront::models::{NewPackage, PackagePatch};

use crate::output;
use crate::{PackageArgs, PackagePatchArgs};

pub fn list_packages(session: &Storefront, search: Option<String>) {
    let packages = session
        .catalog()
        .search_packages(search.as_deref().unwrap_or_default());
    if packages.is_empty() {
        output::line("No packages found");
    }
    for package in packages {
        output::package(package);
    }
}

pub async fn add_package(session: &mut Storefront, args: PackageArgs) -> Result<()> {
    let code = args
        .code
        .map_or_else(|| TrackingCode::generate(args.route), TrackingCode::new);

    let mut input = NewPackage::new(code);
    input.shipping_route = args.route;
    if let Some(status) = args.status {
        input.status = status;
    }
    if let Some(location) = args.location {
        input.current_location = location;
    }
    if let Some(origin) = args.origin {
        input.origin = origin;
    }
    if let Some(destination) = args.destination {
        input.destination = destination;
    }
    input.estimated_delivery = args.delivery;

    let package = session.catalog_mut().add_package(input).await?;
    output::package(&package);
    Ok(())
}

pub async fn update_package(
    session: &mut Storefront,
    id: &str,
    fields: PackagePatchArgs,
) -> Result<()> {
    let patch = PackagePatch {
        tracking_code: fields.code.map(TrackingCode::new),
        status: fields.status,
        shipping_route: fields.route,
        current_location: fields.location,
        origin: fields.origin,
        destination: fields.destination,
        estimated_delivery: fields.delivery,
    };

    let package = session
        .catalog_mut()
        .update_package(&PackageId::new(id), &patch)
        .await?;
    output::package(&package);
    Ok(())
}

pub async fn delete_package(session: &mut Storefront, id: &str) -> Result<()> {
    session
        .catalog_mut()
        .delete_package(&PackageId::new(id))
        .await?;
    output::line(&format!("Deleted package {id}"));
    Ok(())
}

pub async fn track(session: &Storefront, code: &str) -> Result<()> {
    match session.catalog().track(code).await? {
        Some(package) => output::package_detail(&package),
        None => output::line(&format!("No package found for tracking code {}", code.trim())),
    }
    Ok(())
}

pub fn generate_code(route: ShippingRoute) {
    output::line(TrackingCode::generate(route).as_str());
}
