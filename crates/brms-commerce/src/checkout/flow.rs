//! Checkout wizard state machine.

use crate::cart::{CartState, CartStore, Notifier, Toast};
use crate::checkout::{
    BillingDetails, DeliveryDetails, DeliveryMethod, Order, OrderPlacer, OrderStatus,
    PaymentDetails,
};
use crate::error::CommerceError;
use crate::ids::{CheckoutId, OrderId, UserId};
use crate::pricing::PricingConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Steps in the checkout wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckoutStep {
    /// Cart review.
    Cart,
    /// Delivery method and address.
    Delivery,
    /// Billing contact.
    Billing,
    /// Payment method.
    Payment,
    /// Order placed.
    Complete,
}

impl CheckoutStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckoutStep::Cart => "cart",
            CheckoutStep::Delivery => "delivery",
            CheckoutStep::Billing => "billing",
            CheckoutStep::Payment => "payment",
            CheckoutStep::Complete => "complete",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            CheckoutStep::Cart => "Review cart",
            CheckoutStep::Delivery => "Delivery",
            CheckoutStep::Billing => "Billing",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Complete => "Complete",
        }
    }

    /// Get the step number (1-indexed).
    pub fn number(&self) -> u8 {
        match self {
            CheckoutStep::Cart => 1,
            CheckoutStep::Delivery => 2,
            CheckoutStep::Billing => 3,
            CheckoutStep::Payment => 4,
            CheckoutStep::Complete => 5,
        }
    }

    fn next(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Cart => Some(CheckoutStep::Delivery),
            CheckoutStep::Delivery => Some(CheckoutStep::Billing),
            CheckoutStep::Billing => Some(CheckoutStep::Payment),
            CheckoutStep::Payment => Some(CheckoutStep::Complete),
            CheckoutStep::Complete => None,
        }
    }

    fn previous(&self) -> Option<CheckoutStep> {
        match self {
            CheckoutStep::Cart => None,
            CheckoutStep::Delivery => Some(CheckoutStep::Cart),
            CheckoutStep::Billing => Some(CheckoutStep::Delivery),
            CheckoutStep::Payment => Some(CheckoutStep::Billing),
            CheckoutStep::Complete => Some(CheckoutStep::Payment),
        }
    }
}

/// Checkout wizard state: the current step plus every form filled so far.
///
/// The cart itself is not copied in; each call that needs it borrows the
/// store, so the wizard always sees the live cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutFlow {
    /// Unique checkout identifier.
    pub id: CheckoutId,
    /// Deduplication key handed to the order placer.
    pub idempotency_key: String,
    /// Current step.
    pub step: CheckoutStep,
    /// Steps already passed.
    pub completed_steps: Vec<CheckoutStep>,
    /// Logged-in customer, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<UserId>,
    /// Delivery form.
    pub delivery: DeliveryDetails,
    /// Billing form.
    pub billing: BillingDetails,
    /// Payment form.
    #[serde(skip)]
    pub payment: PaymentDetails,
    /// Number of the order this checkout produced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_number: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for CheckoutFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl CheckoutFlow {
    /// Start a guest checkout at the cart review step.
    pub fn new() -> Self {
        let id = CheckoutId::generate();
        let now = Utc::now();
        Self {
            idempotency_key: format!("{}-{}", id, now.timestamp_millis()),
            id,
            step: CheckoutStep::Cart,
            completed_steps: Vec::new(),
            user_id: None,
            delivery: DeliveryDetails::default(),
            billing: BillingDetails::default(),
            payment: PaymentDetails::default(),
            order_number: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Start a checkout for a logged-in customer, pre-filling billing.
    pub fn for_customer(user_id: UserId, contact: BillingDetails) -> Self {
        let mut flow = Self::new();
        flow.user_id = Some(user_id);
        flow.prefill_billing(&contact);
        flow
    }

    /// Fill blank billing fields from a known contact.
    pub fn prefill_billing(&mut self, contact: &BillingDetails) {
        self.billing.fill_blanks_from(contact);
        self.touch();
    }

    /// Select a delivery method, keeping any address already typed.
    pub fn set_delivery_method(&mut self, method: DeliveryMethod) {
        self.delivery.method = Some(method);
        self.touch();
    }

    pub fn set_delivery(&mut self, delivery: DeliveryDetails) {
        self.delivery = delivery;
        self.touch();
    }

    pub fn set_billing(&mut self, billing: BillingDetails) {
        self.billing = billing;
        self.touch();
    }

    pub fn set_payment(&mut self, payment: PaymentDetails) {
        self.payment = payment;
        self.touch();
    }

    /// Check a step's form against the cart.
    pub fn validate_step(&self, step: CheckoutStep, cart: &CartState) -> Result<(), CommerceError> {
        let missing = match step {
            CheckoutStep::Cart => {
                if cart.is_empty() {
                    return Err(CommerceError::EmptyCart);
                }
                Vec::new()
            }
            CheckoutStep::Delivery => self.delivery.missing_fields(),
            CheckoutStep::Billing => self.billing.missing_fields(),
            CheckoutStep::Payment => self.payment.missing_fields(),
            CheckoutStep::Complete => Vec::new(),
        };
        if missing.is_empty() {
            Ok(())
        } else {
            Err(CommerceError::MissingFields(missing))
        }
    }

    /// Check if the current step's form is complete.
    pub fn can_advance(&self, cart: &CartState) -> bool {
        self.step != CheckoutStep::Payment
            && self.step != CheckoutStep::Complete
            && self.validate_step(self.step, cart).is_ok()
    }

    /// Validate the current step and move to the next one.
    ///
    /// Leaving the payment step happens only through [`place_order`].
    ///
    /// [`place_order`]: CheckoutFlow::place_order
    pub fn advance<N: Notifier>(&mut self, cart: &CartStore<N>) -> Result<CheckoutStep, CommerceError> {
        let next = match self.step.next() {
            Some(CheckoutStep::Complete) | None => {
                return Err(self.invalid_transition(CheckoutStep::Complete));
            }
            Some(next) => next,
        };

        if let Err(err) = self.validate_step(self.step, cart.state()) {
            return Err(reject(cart.notifier(), self.step, err));
        }

        self.mark_completed(self.step);
        self.step = next;
        self.touch();
        Ok(next)
    }

    /// Go back one step. Not possible from the first step or once placed.
    pub fn go_back(&mut self) -> Result<CheckoutStep, CommerceError> {
        let prev = match self.step.previous() {
            Some(prev) if self.step != CheckoutStep::Complete => prev,
            other => return Err(self.invalid_transition(other.unwrap_or(self.step))),
        };
        self.step = prev;
        self.touch();
        Ok(prev)
    }

    /// Jump back to the current step or any completed one.
    pub fn go_to(&mut self, step: CheckoutStep) -> Result<(), CommerceError> {
        if self.step != CheckoutStep::Complete
            && (step == self.step || self.completed_steps.contains(&step))
        {
            self.step = step;
            self.touch();
            Ok(())
        } else {
            Err(self.invalid_transition(step))
        }
    }

    /// Validate every step, build the order, hand it to the placer, and
    /// clear the cart.
    ///
    /// The returned order is the only record of it; nothing is persisted.
    pub async fn place_order<N, P>(
        &mut self,
        cart: &mut CartStore<N>,
        pricing: &PricingConfig,
        placer: &P,
    ) -> Result<Order, CommerceError>
    where
        N: Notifier,
        P: OrderPlacer + ?Sized,
    {
        if let Some(number) = &self.order_number {
            return Err(CommerceError::AlreadyPlaced(number.clone()));
        }
        if self.step != CheckoutStep::Payment {
            return Err(self.invalid_transition(CheckoutStep::Complete));
        }

        for step in [
            CheckoutStep::Cart,
            CheckoutStep::Delivery,
            CheckoutStep::Billing,
            CheckoutStep::Payment,
        ] {
            if let Err(err) = self.validate_step(step, cart.state()) {
                return Err(reject(cart.notifier(), step, err));
            }
        }

        let (Some(method), Some(payment)) = (self.delivery.method, self.payment.summary()) else {
            return Err(CommerceError::MissingFields(vec!["delivery method", "payment method"]));
        };
        let totals = cart.totals(pricing, method)?;

        let now = Utc::now();
        let mut order = Order {
            id: OrderId::generate(),
            order_number: Order::generate_order_number(),
            idempotency_key: self.idempotency_key.clone(),
            user_id: self.user_id.clone(),
            customer: self.billing.clone(),
            items: cart.items().to_vec(),
            delivery: self.delivery.clone(),
            payment,
            totals,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
            cancelled_at: None,
        };

        tracing::info!(
            order_number = %order.order_number,
            items = order.items.len(),
            total = %order.totals.total,
            method = method.as_str(),
            "placing order"
        );

        let receipt = match placer.place(&order).await {
            Ok(receipt) => receipt,
            Err(err) => {
                tracing::warn!(order_number = %order.order_number, error = %err, "order placement failed");
                cart.notifier()
                    .notify(Toast::error("Failed to place order. Please try again."));
                return Err(err);
            }
        };
        order.status = OrderStatus::Confirmed;
        order.updated_at = receipt.acknowledged_at;

        cart.clear_cart();
        cart.notifier().notify(Toast::success(format!(
            "Order {} placed successfully",
            order.order_number
        )));

        self.mark_completed(CheckoutStep::Payment);
        self.step = CheckoutStep::Complete;
        self.order_number = Some(order.order_number.clone());
        self.touch();

        Ok(order)
    }

    /// Check if checkout is complete.
    pub fn is_complete(&self) -> bool {
        self.step == CheckoutStep::Complete
    }

    /// Get progress percentage.
    pub fn progress_percent(&self) -> u8 {
        ((self.step.number() as f64 / 5.0) * 100.0) as u8
    }

    fn mark_completed(&mut self, step: CheckoutStep) {
        if !self.completed_steps.contains(&step) {
            self.completed_steps.push(step);
        }
    }

    fn invalid_transition(&self, to: CheckoutStep) -> CommerceError {
        tracing::warn!(from = self.step.as_str(), to = to.as_str(), "rejected checkout transition");
        CommerceError::InvalidCheckoutTransition {
            from: self.step.as_str().to_string(),
            to: to.as_str().to_string(),
        }
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

/// Toast a validation failure and hand the error back.
fn reject<N: Notifier>(notifier: &N, step: CheckoutStep, err: CommerceError) -> CommerceError {
    tracing::debug!(step = step.as_str(), error = %err, "checkout step blocked");
    notifier.notify(Toast::error(err.to_string()));
    err
}
