use crate::error::{Result, StorefrontError};
use hmac::{Hmac, Mac};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// A gateway-side record representing an authorized amount awaiting
/// client-side payment completion.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    pub id: String,
    /// Amount in the gateway's minor-unit convention (e.g. paise for INR).
    pub amount: i64,
    pub currency: String,
}

/// Converts a major-unit amount into the gateway's minor-unit convention.
///
/// The gateway counts in hundredths, so 799 INR becomes 79900. Negative
/// amounts and amounts with sub-minor-unit precision are rejected.
pub fn to_minor_units(amount: Decimal) -> Result<i64> {
    if amount < Decimal::ZERO {
        return Err(StorefrontError::Validation(
            "Amount must not be negative".to_string(),
        ));
    }
    let minor = amount * Decimal::ONE_HUNDRED;
    if !minor.fract().is_zero() {
        return Err(StorefrontError::Validation(
            "Amount has sub-minor-unit precision".to_string(),
        ));
    }
    minor.to_i64().ok_or_else(|| {
        StorefrontError::Validation("Amount does not fit in minor units".to_string())
    })
}

/// Verifies gateway callback signatures.
///
/// The gateway signs `"{transaction_ref}|{payment_id}"` with HMAC-SHA256
/// keyed by the shared secret and sends the digest hex-encoded. Comparison is
/// constant-time via `Mac::verify_slice`.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: String,
}

impl SignatureVerifier {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Returns `Ok(true)` iff `supplied_hex` is the gateway's signature for
    /// the `(transaction_ref, payment_id)` pair.
    ///
    /// A well-formed but wrong signature is `Ok(false)`. A missing secret,
    /// empty identifiers, or a supplied value that is not a 64-character hex
    /// digest are explicit errors, never a silent pass.
    pub fn verify(
        &self,
        transaction_ref: &str,
        payment_id: &str,
        supplied_hex: &str,
    ) -> Result<bool> {
        if transaction_ref.is_empty() || payment_id.is_empty() {
            return Err(StorefrontError::Validation(
                "Transaction reference and payment id must be present".to_string(),
            ));
        }

        let supplied = hex::decode(supplied_hex).map_err(|_| {
            StorefrontError::Validation("Signature is not valid hex".to_string())
        })?;
        if supplied.len() != 32 {
            return Err(StorefrontError::Validation(
                "Signature must be a 64-character SHA-256 digest".to_string(),
            ));
        }

        let mac = self.mac(transaction_ref, payment_id)?;
        Ok(mac.verify_slice(&supplied).is_ok())
    }

    /// Hex digest the gateway is expected to supply for this pair.
    pub fn sign(&self, transaction_ref: &str, payment_id: &str) -> Result<String> {
        let mac = self.mac(transaction_ref, payment_id)?;
        Ok(hex::encode(mac.finalize().into_bytes()))
    }

    fn mac(&self, transaction_ref: &str, payment_id: &str) -> Result<HmacSha256> {
        if self.secret.is_empty() {
            return Err(StorefrontError::Config(
                "Payment gateway secret is not configured".to_string(),
            ));
        }
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .map_err(|e| StorefrontError::Internal(Box::new(e)))?;
        mac.update(transaction_ref.as_bytes());
        mac.update(b"|");
        mac.update(payment_id.as_bytes());
        Ok(mac)
    }
}
