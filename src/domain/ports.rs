use super::order::{Order, OrderDraft, OrderStatus};
use super::payment::PaymentIntent;
use super::product::{Product, ProductDraft};
use crate::error::Result;
use async_trait::async_trait;
use std::sync::Arc;

/// Persistence port for orders.
///
/// The store exclusively owns order records: it assigns `id` and
/// `created_at` at insertion and nothing mutates a record afterwards.
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Persists a draft and returns the stored record. The caller must not
    /// assume the order was saved unless this returns `Ok`.
    async fn insert(&self, draft: OrderDraft, status: OrderStatus) -> Result<Order>;

    /// All orders, newest-first by `created_at`.
    async fn list_by_recency(&self) -> Result<Vec<Order>>;
}

/// Persistence port for catalog entries.
#[async_trait]
pub trait ProductStore: Send + Sync {
    async fn insert(&self, draft: ProductDraft) -> Result<Product>;
    async fn get(&self, product_id: &str) -> Result<Option<Product>>;
    async fn list_by_recency(&self) -> Result<Vec<Product>>;
}

/// Remote payment gateway, consumed as an opaque request/response call.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Registers an intent for `amount_minor` (gateway minor-unit
    /// convention) and returns the gateway's reference for it.
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentIntent>;
}

/// An outbound plain-text email.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MailMessage {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// Outbound mail transport, treated as fire-and-forget by callers.
#[async_trait]
pub trait MailTransport: Send + Sync {
    async fn send(&self, message: &MailMessage) -> Result<()>;
}

pub type OrderStoreRef = Arc<dyn OrderStore>;
pub type ProductStoreRef = Arc<dyn ProductStore>;
pub type PaymentGatewayRef = Arc<dyn PaymentGateway>;
pub type MailTransportRef = Arc<dyn MailTransport>;
