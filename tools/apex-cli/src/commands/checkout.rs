//! Checkout command.

use anyhow::{Context as _, Result};
use apex_commerce::checkout::{DeliveryMethod, OrderSummary, PaymentTerms};
use dialoguer::Confirm;

use super::CheckoutArgs;
use crate::context::Context;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let delivery: DeliveryMethod = args.delivery.parse()?;
    let mut store = ctx.open_storefront()?;

    if !ctx.output.is_json() {
        super::cart::render(store.cart(), ctx);
        if store.cart().is_empty() {
            return Ok(());
        }

        let summary = OrderSummary::new(&store.cart().pricing(), delivery);
        let account = store.trade_user().map(|a| a.id.clone());
        let terms = PaymentTerms::for_account(account.as_ref());

        ctx.output.header("Order summary");
        ctx.output.kv(
            "Delivery",
            &format!("{} ({})", delivery.display_name(), delivery.estimate()),
        );
        let charge = if delivery.is_free() {
            "FREE".to_string()
        } else {
            summary.delivery_charge.to_string()
        };
        ctx.output.kv("Delivery charge", &charge);
        ctx.output.kv(
            &format!("Order total ({})", summary.vat_display.label()),
            &summary.total.to_string(),
        );
        ctx.output.kv("Payment", &terms.description());

        if !args.yes {
            let confirmed = Confirm::new()
                .with_prompt("Place order?")
                .default(true)
                .interact()?;
            if !confirmed {
                ctx.output.warn("Order not placed");
                return Ok(());
            }
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let result = store.checkout(delivery).await;
    spinner.finish_and_clear();
    let order = result.context("Checkout failed")?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output
        .success(&format!("Order {} confirmed", order.number));
    ctx.output.kv("Items", &order.item_count().to_string());
    ctx.output.kv("Total", &order.summary.total.to_string());
    ctx.output.kv("Payment", &order.payment_terms.description());
    Ok(())
}
