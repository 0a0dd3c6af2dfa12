//! Price a cart file without placing an order.

use anyhow::Result;
use brms_commerce::cart::{CartItem, CartStore, TracingNotifier};
use brms_commerce::checkout::DeliveryMethod;
use brms_commerce::pricing::Totals;
use serde::Serialize;

use super::QuoteArgs;
use crate::cart_file::CartFile;
use crate::context::Context;
use crate::output::Output;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Quote<'a> {
    delivery_method: DeliveryMethod,
    items: &'a [CartItem],
    totals: Totals,
}

/// Run the quote command.
pub async fn run(args: QuoteArgs, ctx: &Context) -> Result<()> {
    let pricing = ctx.pricing();
    let lines = CartFile::load(&ctx.resolve_path(&args.cart))?.to_cart_items(pricing.currency)?;

    // Same product twice in the file becomes one line.
    let mut cart = CartStore::new(TracingNotifier);
    for line in lines {
        cart.add_item(line)?;
    }

    let totals = cart.totals(&pricing, args.delivery)?;

    if ctx.output.is_json() {
        ctx.output.json(&Quote {
            delivery_method: args.delivery,
            items: cart.items(),
            totals,
        });
        return Ok(());
    }

    ctx.output.header(&format!("Quote ({})", args.delivery.display_name()));
    print_lines(&ctx.output, cart.items());
    print_totals(&ctx.output, &totals);

    Ok(())
}

/// Print cart lines as a table.
pub fn print_lines(output: &Output, items: &[CartItem]) {
    let widths = [24, 5, 14];
    for item in items {
        let name = if item.modifiers.is_empty() {
            item.name.clone()
        } else {
            format!("{} ({})", item.name, item.modifiers.join(", "))
        };
        let quantity = format!("x{}", item.quantity);
        let price = item.total_price.display();
        output.table_row(&[name.as_str(), quantity.as_str(), price.as_str()], &widths);
        if let Some(note) = &item.special_instructions {
            output.list_item(note);
        }
    }
}

/// Print the totals block.
pub fn print_totals(output: &Output, totals: &Totals) {
    output.info("");
    output.kv("Subtotal", &totals.subtotal.display());
    output.kv("Tax", &totals.tax.display());
    output.kv("Delivery fee", &totals.delivery_fee.display());
    output.kv("Total", &totals.total.display());
}
