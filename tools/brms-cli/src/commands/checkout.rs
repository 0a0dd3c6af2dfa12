//! Run the checkout wizard against a cart file and place the order.

use anyhow::{Context as _, Result};
use brms_commerce::cart::CartStore;
use brms_commerce::checkout::{
    BillingDetails, CheckoutFlow, CheckoutStep, DeliveryDetails, PaymentDetails, PaymentMethod,
};
use dialoguer::Confirm;

use super::quote::{print_lines, print_totals};
use super::CheckoutArgs;
use crate::cart_file::CartFile;
use crate::context::Context;
use crate::output::status_badge;

const STEPS: u8 = 4;

/// Run the checkout command.
pub async fn run(args: CheckoutArgs, ctx: &Context) -> Result<()> {
    let pricing = ctx.pricing();
    let lines = CartFile::load(&ctx.resolve_path(&args.cart))?.to_cart_items(pricing.currency)?;

    let mut cart = CartStore::new(ctx.output.clone());
    for line in lines {
        cart.add_item(line)?;
    }

    let session = ctx.sessions().current().context("Failed to read session")?;
    let mut flow = match &session {
        Some(session) => {
            ctx.output.debug(&format!("Checking out as {}", session.profile().email));
            CheckoutFlow::for_customer(session.user_id().clone(), session.billing_details())
        }
        None => CheckoutFlow::new(),
    };

    ctx.output.header("Checkout");

    // Cart
    show_step(ctx, flow.step);
    print_lines(&ctx.output, cart.items());
    flow.advance(&cart)?;

    // Delivery
    show_step(ctx, flow.step);
    flow.set_delivery(delivery_details(&args));
    ctx.output.kv("Delivery", &flow.delivery.describe());
    flow.advance(&cart)?;

    // Billing
    show_step(ctx, flow.step);
    let mut billing = BillingDetails::new(
        args.name.clone().unwrap_or_default(),
        args.email.clone().unwrap_or_default(),
        args.phone.clone().unwrap_or_default(),
    );
    billing.fill_blanks_from(&flow.billing);
    flow.set_billing(billing);
    ctx.output.kv(
        "Contact",
        &format!(
            "{} <{}> {}",
            flow.billing.full_name, flow.billing.email, flow.billing.phone
        ),
    );
    flow.advance(&cart)?;

    // Payment
    show_step(ctx, flow.step);
    flow.set_payment(payment_details(&args, &flow.billing));
    if let Some(summary) = flow.payment.summary() {
        ctx.output.kv("Payment", &summary.to_string());
    }
    let totals = cart.totals(&pricing, args.delivery)?;
    print_totals(&ctx.output, &totals);

    if !args.yes && !ctx.output.is_json() {
        ctx.output.info("");
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", totals.total.display()))
            .default(true)
            .interact()?;

        if !confirmed {
            ctx.output.warn("Checkout cancelled");
            return Ok(());
        }
    }

    let spinner = ctx.output.spinner("Placing order...");
    let placed = flow.place_order(&mut cart, &pricing, &ctx.placer()).await;
    spinner.finish_and_clear();
    let order = placed?;

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }

    ctx.output.header(&format!("Order {}", order.order_number));
    ctx.output.kv("Status", &status_badge(order.status));
    for line in order.summary().iter().skip(2) {
        ctx.output.list_item(line);
    }

    Ok(())
}

fn show_step(ctx: &Context, step: CheckoutStep) {
    ctx.output.step(step.number(), STEPS, step.display_name());
}

fn delivery_details(args: &CheckoutArgs) -> DeliveryDetails {
    let mut details = DeliveryDetails::for_method(args.delivery);
    if let Some(address) = &args.address {
        details.address = address.clone();
    }
    if let Some(district) = &args.district {
        details.district = district.clone();
    }
    if let Some(location) = &args.location {
        details.location = location.clone();
    }
    details.table_number = args.table.clone();
    details.notes = args.notes.clone();
    details
}

fn payment_details(args: &CheckoutArgs, billing: &BillingDetails) -> PaymentDetails {
    match args.payment {
        PaymentMethod::MobileMoney => PaymentDetails::mobile_money(
            args.momo_phone.clone().unwrap_or_else(|| billing.phone.clone()),
        ),
        PaymentMethod::Card => PaymentDetails::card(
            args.card_holder
                .clone()
                .unwrap_or_else(|| billing.full_name.clone()),
            args.card_number.clone().unwrap_or_default(),
            args.card_expiry.clone().unwrap_or_default(),
            args.card_cvv.clone().unwrap_or_default(),
        ),
        PaymentMethod::Cash => PaymentDetails::cash(),
    }
}
