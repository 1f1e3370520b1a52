//! Cart, checkout and custom order commands.

use preorder_core::ProductId;
use preorder_storefront::Storefront;
use preorder_storefront::error::Result;
use preorder_storefront::models::CustomOrderRequest;

use crate::CustomOrderArgs;
use crate::output;

pub fn show_cart(session: &Storefront) {
    output::cart(session.cart(), session.brand().currency);
}

pub fn add_to_cart(session: &mut Storefront, product_id: &str, quantity: u32) -> Result<()> {
    session.add_to_cart(&ProductId::new(product_id), quantity)?;
    show_cart(session);
    Ok(())
}

pub fn set_quantity(session: &mut Storefront, product_id: &str, quantity: i64) {
    session
        .cart_mut()
        .set_quantity(&ProductId::new(product_id), quantity);
    show_cart(session);
}

pub fn remove_from_cart(session: &mut Storefront, product_id: &str) {
    session.cart_mut().remove_item(&ProductId::new(product_id));
    show_cart(session);
}

pub fn clear_cart(session: &mut Storefront) {
    session.cart_mut().clear();
    show_cart(session);
}

pub async fn checkout(session: &mut Storefront, record: bool) -> Result<()> {
    let (checkout, order) = session.checkout_cart(record).await?;
    output::handoff(&checkout.message, &checkout.url, order.as_ref());
    Ok(())
}

pub async fn custom_order(session: &Storefront, args: CustomOrderArgs) -> Result<()> {
    let request = CustomOrderRequest {
        product_link: args.link,
        description: args.description,
        quantity: args.quantity,
        country: args.country,
        reference_image: args.image,
    };

    let (checkout, order) = session.custom_order(&request, args.record).await?;
    output::handoff(&checkout.message, &checkout.url, order.as_ref());
    Ok(())
}
