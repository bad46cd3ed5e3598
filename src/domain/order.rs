use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the customer chose to pay for an order.
///
/// The wire representation is an open set of lowercase strings ("cod",
/// "razorpay", ...); unknown methods are preserved verbatim so that a record
/// written by a newer client still round-trips.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentMethod {
    Cod,
    Razorpay,
    Other(String),
}

impl PaymentMethod {
    pub fn as_str(&self) -> &str {
        match self {
            PaymentMethod::Cod => "cod",
            PaymentMethod::Razorpay => "razorpay",
            PaymentMethod::Other(s) => s,
        }
    }

    /// The status a freshly placed order gets for this payment method.
    ///
    /// Cash-on-delivery orders start out `pending`; every other method is
    /// recorded as `paid` on the caller's say-so. See DESIGN.md for why this
    /// is preserved as-is rather than tied to signature verification.
    pub fn initial_status(&self) -> OrderStatus {
        match self {
            PaymentMethod::Cod => OrderStatus::Pending,
            _ => OrderStatus::Paid,
        }
    }
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PaymentMethod {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for PaymentMethod {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(match s.as_str() {
            "cod" => PaymentMethod::Cod,
            "razorpay" => PaymentMethod::Razorpay,
            _ => PaymentMethod::Other(s),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Paid,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A snapshot of one product line captured at order time.
///
/// Later catalog edits must never alter these fields.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// Catalog reference. Legacy records carry numeric ids, newer ones
    /// store-assigned strings; both deserialize into the string form.
    #[serde(deserialize_with = "deserialize_product_id")]
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub size: String,
    pub quantity: u32,
    /// Media storage path. Copied verbatim, never dereferenced server-side.
    pub image_ref: String,
}

impl LineItem {
    /// Price of the whole line (unit price times quantity).
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

fn deserialize_product_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    struct IdVisitor;

    impl serde::de::Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a string or numeric product id")
        }

        fn visit_str<E: serde::de::Error>(self, v: &str) -> Result<String, E> {
            Ok(v.to_owned())
        }

        fn visit_u64<E: serde::de::Error>(self, v: u64) -> Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: serde::de::Error>(self, v: i64) -> Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
    pub city: String,
    pub postal_code: String,
}

/// The caller-supplied part of an order, before the store assigns identity.
///
/// `total` is taken from the client as-is and not recomputed against the
/// catalog (preserved behavior, see DESIGN.md).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct OrderDraft {
    pub items: Vec<LineItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_id: Option<String>,
    pub customer_email: Option<String>,
    pub shipping_address: ShippingAddress,
}

/// A durably stored order.
///
/// `id` and `created_at` are assigned by the store at insertion. The `items`
/// snapshot is immutable once written; only `status` may ever change, and no
/// current flow exercises that.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub items: Vec<LineItem>,
    pub total: Decimal,
    pub payment_method: PaymentMethod,
    pub payment_id: Option<String>,
    pub status: OrderStatus,
    pub customer_email: Option<String>,
    pub shipping_address: ShippingAddress,
    pub created_at: DateTime<Utc>,
}
