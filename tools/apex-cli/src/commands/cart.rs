//! Cart commands.

use anyhow::{bail, Result};
use apex_commerce::cart::{CartEngine, VatDisplay};
use apex_commerce::ids::PartId;
use dialoguer::Confirm;

use super::{CartArgs, CartCommand, VatMode};
use crate::context::Context;
use crate::output::truncate;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;

    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => {}
        CartCommand::Add {
            part_number,
            quantity,
        } => {
            store.add_part(&part_number, quantity)?;
            ctx.output
                .success(&format!("Added {} x {}", quantity, part_number.to_uppercase()));
        }
        CartCommand::Remove { part_number } => {
            let id = resolve_line(store.cart(), &part_number)?;
            store.cart_mut().remove_item(&id)?;
            ctx.output.success(&format!("Removed {}", id));
        }
        CartCommand::Update {
            part_number,
            quantity,
        } => {
            let id = resolve_line(store.cart(), &part_number)?;
            store.cart_mut().update_quantity(&id, quantity)?;
            if quantity < 1 {
                ctx.output.success(&format!("Removed {}", id));
            } else {
                ctx.output.success(&format!("{} quantity set to {}", id, quantity));
            }
        }
        CartCommand::Clear { yes } => {
            if store.cart().is_empty() {
                ctx.output.info("Cart is already empty");
                return Ok(());
            }
            if !yes && !ctx.output.is_json() {
                let confirmed = Confirm::new()
                    .with_prompt(format!("Remove all {} items?", store.cart().item_count()))
                    .default(false)
                    .interact()?;
                if !confirmed {
                    ctx.output.warn("Cancelled");
                    return Ok(());
                }
            }
            store.cart_mut().clear()?;
            ctx.output.success("Cart cleared");
        }
        CartCommand::Vat { mode } => {
            store.cart_mut().set_vat_display(match mode {
                VatMode::Inc => VatDisplay::Inclusive,
                VatMode::Exc => VatDisplay::Exclusive,
            });
        }
    }

    render(store.cart(), ctx);
    Ok(())
}

/// Print the cart lines and totals.
pub fn render(cart: &CartEngine, ctx: &Context) {
    let pricing = cart.pricing();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart.items(),
            "pricing": pricing,
        }));
        return;
    }

    ctx.output.header(&format!("Your cart ({} items)", pricing.item_count));
    if pricing.is_empty() {
        ctx.output.info("Your cart is empty");
        return;
    }

    let widths = [12, 32, 10, 4, 10];
    ctx.output
        .table_row(&["PART", "NAME", "BRAND", "QTY", "PRICE"], &widths);
    for (item, line) in cart.items().iter().zip(&pricing.line_items) {
        let price = (line.display_unit_price * line.quantity).to_string();
        let quantity = line.quantity.to_string();
        let name = truncate(&item.name, 32);
        ctx.output.table_row(
            &[
                item.part_number.as_str(),
                name.as_str(),
                item.brand.as_str(),
                quantity.as_str(),
                price.as_str(),
            ],
            &widths,
        );
    }

    println!();
    ctx.output.kv("Subtotal", &pricing.subtotal.to_string());
    ctx.output.kv("VAT (20%)", &pricing.vat_amount.to_string());
    ctx.output.kv(
        &format!("Total ({})", pricing.vat_display.label()),
        &pricing.total.to_string(),
    );
}

/// Find the cart line for a user-typed part number.
fn resolve_line(cart: &CartEngine, part_number: &str) -> Result<PartId> {
    match cart
        .items()
        .iter()
        .find(|item| item.id.as_str().eq_ignore_ascii_case(part_number.trim()))
    {
        Some(item) => Ok(item.id.clone()),
        None => bail!("{} is not in the cart", part_number),
    }
}
