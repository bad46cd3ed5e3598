use crate::domain::order::Order;
use crate::domain::ports::{MailMessage, MailTransportRef};
use std::fmt::Write;
use tracing::error;

/// Sends order emails after the store has confirmed the write.
///
/// Every send runs on its own detached task: the checkout response never
/// waits for mail, and a failed send is logged and dropped. There is no
/// retry and no durable outbox.
pub struct NotificationDispatcher {
    transport: MailTransportRef,
    operator_address: String,
}

impl NotificationDispatcher {
    pub fn new(transport: MailTransportRef, operator_address: impl Into<String>) -> Self {
        Self {
            transport,
            operator_address: operator_address.into(),
        }
    }

    /// Dispatches the operator summary and, when the customer left an email
    /// address, a shorter confirmation. Must only be called for orders that
    /// are already durably stored.
    pub fn notify_order_created(&self, order: &Order) {
        spawn_send(
            self.transport.clone(),
            operator_summary(order, &self.operator_address),
        );

        if let Some(customer) = &order.customer_email {
            spawn_send(self.transport.clone(), customer_confirmation(order, customer));
        }
    }
}

fn spawn_send(transport: MailTransportRef, message: MailMessage) {
    tokio::spawn(async move {
        if let Err(e) = transport.send(&message).await {
            error!(to = %message.to, error = %e, "order notification failed");
        }
    });
}

fn item_lines(order: &Order) -> String {
    let mut out = String::new();
    for item in &order.items {
        let _ = writeln!(
            out,
            "{} (Size: {}, Qty: {}) - ₹{}",
            item.name,
            item.size,
            item.quantity,
            item.line_total()
        );
    }
    out
}

/// Full plain-text summary for the operator inbox.
pub fn operator_summary(order: &Order, to: &str) -> MailMessage {
    let body = format!(
        "New Order Details:\n\n\
         Order ID: {id}\n\
         Payment Method: {method}\n\
         Payment ID: {payment_id}\n\
         Total Amount: ₹{total}\n\
         Status: {status}\n\
         Customer Email: {customer}\n\n\
         Shipping Information:\n\
         Name: {first} {last}\n\
         Address: {address}\n\
         City: {city}\n\
         Postal Code: {postal_code}\n\
         Phone: {phone}\n\n\
         Items:\n{items}",
        id = order.id,
        method = order.payment_method,
        payment_id = order.payment_id.as_deref().unwrap_or("N/A"),
        total = order.total,
        status = order.status,
        customer = order.customer_email.as_deref().unwrap_or("Not provided"),
        first = order.shipping_address.first_name,
        last = order.shipping_address.last_name,
        address = order.shipping_address.address,
        city = order.shipping_address.city,
        postal_code = order.shipping_address.postal_code,
        phone = order.shipping_address.phone,
        items = item_lines(order),
    );

    MailMessage {
        to: to.to_string(),
        subject: format!("New Order Received - Order ID: {}", order.id),
        body,
    }
}

/// Shorter confirmation for the customer.
pub fn customer_confirmation(order: &Order, to: &str) -> MailMessage {
    let body = format!(
        "Thank you for your order!\n\n\
         Order ID: {id}\n\
         Total Amount: ₹{total}\n\n\
         Items:\n{items}\n\
         We will notify you when your order is shipped.",
        id = order.id,
        total = order.total,
        items = item_lines(order),
    );

    MailMessage {
        to: to.to_string(),
        subject: format!("Order Confirmation - Order ID: {}", order.id),
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::{
        LineItem, Order, OrderStatus, PaymentMethod, ShippingAddress,
    };
    use crate::domain::ports::MailTransport;
    use crate::error::{Result, StorefrontError};
    use async_trait::async_trait;
    use chrono::Utc;
    use rust_decimal_macros::dec;
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct RecordingTransport {
        fail: bool,
        sent: Mutex<Vec<MailMessage>>,
    }

    impl RecordingTransport {
        fn count(&self) -> usize {
            self.sent.lock().unwrap().len()
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

    fn sample_order(customer_email: Option<&str>) -> Order {
        Order {
            id: "ord_1".to_string(),
            items: vec![LineItem {
                product_id: "42".to_string(),
                name: "The Aura tee".to_string(),
                unit_price: dec!(799),
                size: "L".to_string(),
                quantity: 2,
                image_ref: "/uploads/p1f.jpeg".to_string(),
            }],
            total: dec!(1598),
            payment_method: PaymentMethod::Razorpay,
            payment_id: Some("pay_123".to_string()),
            status: OrderStatus::Paid,
            customer_email: customer_email.map(str::to_string),
            shipping_address: ShippingAddress {
                first_name: "Asha".to_string(),
                last_name: "Rao".to_string(),
                address: "12 MG Road".to_string(),
                phone: "9999999999".to_string(),
                city: "Bengaluru".to_string(),
                postal_code: "560001".to_string(),
            },
            created_at: Utc::now(),
        }
    }

    async fn wait_for_sends(transport: &RecordingTransport, expected: usize) {
        for _ in 0..1000 {
            if transport.count() >= expected {
                return;
            }
            tokio::task::yield_now().await;
        }
        panic!(
            "expected {expected} sends, observed {} after waiting",
            transport.count()
        );
    }

    #[test]
    fn test_operator_summary_contents() {
        let order = sample_order(Some("asha@example.com"));
        let message = operator_summary(&order, "orders@example.com");

        assert_eq!(message.to, "orders@example.com");
        assert!(message.subject.contains("ord_1"));
        assert!(message.body.contains("Payment Method: razorpay"));
        assert!(message.body.contains("Status: paid"));
        assert!(message.body.contains("Total Amount: ₹1598"));
        assert!(message.body.contains("The Aura tee (Size: L, Qty: 2) - ₹1598"));
        assert!(message.body.contains("Name: Asha Rao"));
        assert!(message.body.contains("Postal Code: 560001"));
    }

    #[test]
    fn test_operator_summary_without_payment_id() {
        let mut order = sample_order(None);
        order.payment_id = None;
        let message = operator_summary(&order, "orders@example.com");
        assert!(message.body.contains("Payment ID: N/A"));
        assert!(message.body.contains("Customer Email: Not provided"));
    }

    #[test]
    fn test_customer_confirmation_is_shorter() {
        let order = sample_order(Some("asha@example.com"));
        let message = customer_confirmation(&order, "asha@example.com");
        assert_eq!(message.to, "asha@example.com");
        assert!(message.body.contains("Thank you for your order!"));
        assert!(!message.body.contains("Shipping Information"));
    }

    #[tokio::test]
    async fn test_two_sends_with_customer_email() {
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher =
            NotificationDispatcher::new(transport.clone(), "orders@example.com");

        dispatcher.notify_order_created(&sample_order(Some("asha@example.com")));
        wait_for_sends(&transport, 2).await;

        let sent = transport.sent.lock().unwrap();
        let recipients: Vec<&str> = sent.iter().map(|m| m.to.as_str()).collect();
        assert!(recipients.contains(&"orders@example.com"));
        assert!(recipients.contains(&"asha@example.com"));
    }

    #[tokio::test]
    async fn test_one_send_without_customer_email() {
        let transport = Arc::new(RecordingTransport::default());
        let dispatcher =
            NotificationDispatcher::new(transport.clone(), "orders@example.com");

        dispatcher.notify_order_created(&sample_order(None));
        wait_for_sends(&transport, 1).await;

        for _ in 0..100 {
            tokio::task::yield_now().await;
        }
        assert_eq!(transport.count(), 1);
    }

    #[tokio::test]
    async fn test_transport_failure_is_swallowed() {
        let transport = Arc::new(RecordingTransport {
            fail: true,
            sent: Mutex::new(Vec::new()),
        });
        let dispatcher =
            NotificationDispatcher::new(transport.clone(), "orders@example.com");

        dispatcher.notify_order_created(&sample_order(Some("asha@example.com")));
        wait_for_sends(&transport, 2).await;
    }
}
