use async_trait::async_trait;
use rust_decimal_macros::dec;
use std::sync::{Arc, Mutex};
use storefront::application::checkout::CheckoutEngine;
use storefront::application::notification::NotificationDispatcher;
use storefront::domain::order::{LineItem, OrderDraft, PaymentMethod, ShippingAddress};
use storefront::domain::payment::{PaymentIntent, SignatureVerifier};
use storefront::domain::ports::{MailMessage, MailTransport, PaymentGateway};
use storefront::error::{Result, StorefrontError};
use storefront::infrastructure::in_memory::InMemoryOrderStore;

pub const TEST_SECRET: &str = "s3cret";

/// Gateway stub that records every intent request.
pub struct FakeGateway {
    pub calls: Mutex<Vec<(i64, String, String)>>,
    pub fail: bool,
}

impl FakeGateway {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            fail: true,
        })
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentIntent> {
        if self.fail {
            return Err(StorefrontError::Gateway("gateway refused".to_string()));
        }
        self.calls.lock().unwrap().push((
            amount_minor,
            currency.to_string(),
            receipt.to_string(),
        ));
        Ok(PaymentIntent {
            id: "intent_1".to_string(),
            amount: amount_minor,
            currency: currency.to_string(),
        })
    }
}

/// Mail transport stub that records every attempted send.
pub struct RecordingTransport {
    pub sent: Mutex<Vec<MailMessage>>,
    pub fail: bool,
}

impl RecordingTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: false,
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        })
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn recipients(&self) -> Vec<String> {
        self.sent.lock().unwrap().iter().map(|m| m.to.clone()).collect()
    }

    /// Yields until `expected` sends were attempted; panics if they never
    /// arrive.
    pub async fn wait_for(&self, expected: usize) {
        for _ in 0..2000 {
            if self.count() >= expected {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!("expected {expected} sends, observed {}", self.count());
    }
}

#[async_trait]
impl MailTransport for RecordingTransport {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            return Err(StorefrontError::Notification("smtp down".to_string()));
        }
        Ok(())
    }
}

pub fn draft(method: PaymentMethod, customer_email: Option<&str>) -> OrderDraft {
    OrderDraft {
        items: vec![LineItem {
            product_id: "p1".to_string(),
            name: "The Aura tee".to_string(),
            unit_price: dec!(799),
            size: "L".to_string(),
            quantity: 1,
            image_ref: "/uploads/p1f.jpeg".to_string(),
        }],
        total: dec!(799),
        payment_id: match method {
            PaymentMethod::Cod => None,
            _ => Some("pay_123".to_string()),
        },
        payment_method: method,
        customer_email: customer_email.map(str::to_string),
        shipping_address: ShippingAddress {
            first_name: "Asha".to_string(),
            last_name: "Rao".to_string(),
            address: "12 MG Road".to_string(),
            phone: "9999999999".to_string(),
            city: "Bengaluru".to_string(),
            postal_code: "560001".to_string(),
        },
    }
}

/// An engine wired against in-memory infrastructure and the stubs above.
pub fn test_engine(
    gateway: Arc<FakeGateway>,
    transport: Arc<RecordingTransport>,
) -> Arc<CheckoutEngine> {
    Arc::new(CheckoutEngine::new(
        gateway,
        SignatureVerifier::new(TEST_SECRET),
        Arc::new(InMemoryOrderStore::new()),
        NotificationDispatcher::new(transport, "orders@example.com"),
    ))
}
