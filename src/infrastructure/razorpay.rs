use crate::domain::payment::PaymentIntent;
use crate::domain::ports::PaymentGateway;
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub const RAZORPAY_API_BASE: &str = "https://api.razorpay.com";

#[derive(Debug, Serialize, PartialEq, Eq)]
struct CreateOrderBody<'a> {
    amount: i64,
    currency: &'a str,
    receipt: &'a str,
}

#[derive(Debug, Deserialize)]
struct GatewayOrder {
    id: String,
    amount: i64,
    currency: String,
}

/// Razorpay Orders API client.
///
/// Intent creation is a single authenticated POST; the gateway keeps its own
/// retry and error semantics, so any non-success response is surfaced to the
/// caller as a `Gateway` error without retrying here.
pub struct RazorpayGateway {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
}

impl RazorpayGateway {
    pub fn new(key_id: impl Into<String>, key_secret: impl Into<String>) -> Self {
        Self::with_base_url(RAZORPAY_API_BASE, key_id, key_secret)
    }

    pub fn with_base_url(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
    ) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
        }
    }
}

#[async_trait]
impl PaymentGateway for RazorpayGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        receipt: &str,
    ) -> Result<PaymentIntent> {
        let url = format!("{}/v1/orders", self.base_url);
        let body = CreateOrderBody {
            amount: amount_minor,
            currency,
            receipt,
        };

        let response = self
            .http
            .post(&url)
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await
            .map_err(|e| StorefrontError::Gateway(e.to_string()))?;

        if !response.status().is_success() {
            return Err(StorefrontError::Gateway(format!(
                "intent creation returned {}",
                response.status()
            )));
        }

        let order: GatewayOrder = response
            .json()
            .await
            .map_err(|e| StorefrontError::Gateway(e.to_string()))?;

        Ok(PaymentIntent {
            id: order.id,
            amount: order.amount,
            currency: order.currency,
        })
    }
}
