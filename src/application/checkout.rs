use super::notification::NotificationDispatcher;
use crate::domain::order::{Order, OrderDraft};
use crate::domain::payment::{PaymentIntent, SignatureVerifier, to_minor_units};
use crate::domain::ports::{OrderStoreRef, PaymentGatewayRef};
use crate::error::Result;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

/// The main entry point for the checkout workflow.
///
/// `CheckoutEngine` orchestrates the gateway, the signature verifier, the
/// order store, and the notification dispatcher. All collaborators are
/// injected at construction; the engine holds no process-wide state.
///
/// A checkout attempt moves through: intent creation, client-side payment,
/// callback verification, persistence, notification. Persistence is awaited
/// before success is reported; notification is not.
pub struct CheckoutEngine {
    gateway: PaymentGatewayRef,
    verifier: SignatureVerifier,
    orders: OrderStoreRef,
    notifier: NotificationDispatcher,
}

impl CheckoutEngine {
    pub fn new(
        gateway: PaymentGatewayRef,
        verifier: SignatureVerifier,
        orders: OrderStoreRef,
        notifier: NotificationDispatcher,
    ) -> Self {
        Self {
            gateway,
            verifier,
            orders,
            notifier,
        }
    }

    /// Registers a payment intent with the gateway for a major-unit amount.
    ///
    /// The amount is converted into the gateway's minor-unit convention
    /// before the call. Gateway failures surface as `Err(Gateway)` with no
    /// retry.
    pub async fn create_intent(&self, amount: Decimal, currency: &str) -> Result<PaymentIntent> {
        let minor = to_minor_units(amount)?;
        let receipt = format!("receipt_{}", Uuid::new_v4().simple());
        let intent = self.gateway.create_intent(minor, currency, &receipt).await?;
        info!(intent_id = %intent.id, amount_minor = minor, currency, "payment intent created");
        Ok(intent)
    }

    /// Checks a gateway callback signature.
    ///
    /// `Ok(false)` is the non-exceptional "signature did not match" outcome;
    /// nothing is persisted either way.
    pub fn verify_callback(
        &self,
        transaction_ref: &str,
        payment_id: &str,
        signature: &str,
    ) -> Result<bool> {
        self.verifier.verify(transaction_ref, payment_id, signature)
    }

    /// Persists an order and dispatches notifications.
    ///
    /// Status is derived from the payment method alone: cash-on-delivery is
    /// `pending`, everything else `paid` (see DESIGN.md). Notifications are
    /// dispatched only after the store confirms the write, and this method
    /// does not wait for them.
    pub async fn place_order(&self, draft: OrderDraft) -> Result<Order> {
        let status = draft.payment_method.initial_status();
        let order = self.orders.insert(draft, status).await?;
        info!(order_id = %order.id, status = %order.status, "order persisted");

        self.notifier.notify_order_created(&order);
        Ok(order)
    }

    /// All orders, newest-first, for administrative review.
    pub async fn list_orders(&self) -> Result<Vec<Order>> {
        self.orders.list_by_recency().await
    }
}
