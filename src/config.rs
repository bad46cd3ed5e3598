use crate::error::{Result, StorefrontError};
use std::env;
use std::fs::read_to_string;
use tracing::info;

/// Runtime configuration, sourced from the environment with a
/// `/run/secrets/<NAME>` file fallback for secret material.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// Origin allowed to call the API from a browser.
    pub allowed_origin: String,
    pub currency: String,
    pub razorpay_key_id: String,
    pub razorpay_key_secret: String,
    pub smtp_host: String,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Sender address for all outbound mail.
    pub mail_from: String,
    /// Fixed operator inbox that receives every order summary.
    pub operator_email: String,
    pub admin_email: String,
    pub admin_password: String,
    pub admin_token_secret: String,
    pub admin_token_ttl_secs: i64,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(|key| {
            env::var(key)
                .ok()
                .or_else(|| read_to_string(format!("/run/secrets/{key}"))
                    .ok()
                    .map(|s| s.trim().to_string()))
        })
    }

    /// Builds a config from any key lookup. Missing required keys are
    /// configuration errors; optional keys fall back to their defaults.
    pub fn load_from(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let optional = |key: &str, default: &str| {
            lookup(key).unwrap_or_else(|| {
                info!("{key} not set, using default: {default}");
                default.to_string()
            })
        };
        let required = |key: &str| {
            lookup(key).ok_or_else(|| {
                StorefrontError::Config(format!("{key} is not set"))
            })
        };

        let port = optional("PORT", "5000").parse().map_err(|_| {
            StorefrontError::Config("PORT must be a number".to_string())
        })?;
        let admin_token_ttl_secs =
            optional("ADMIN_TOKEN_TTL_SECS", "86400").parse().map_err(|_| {
                StorefrontError::Config("ADMIN_TOKEN_TTL_SECS must be a number".to_string())
            })?;

        Ok(Self {
            port,
            allowed_origin: optional("ALLOWED_ORIGIN", "http://localhost:5173"),
            currency: optional("CURRENCY", "INR"),
            razorpay_key_id: required("RAZORPAY_KEY_ID")?,
            razorpay_key_secret: required("RAZORPAY_KEY_SECRET")?,
            smtp_host: optional("SMTP_HOST", "smtp.gmail.com"),
            smtp_username: required("SMTP_USERNAME")?,
            smtp_password: required("SMTP_PASSWORD")?,
            mail_from: required("MAIL_FROM")?,
            operator_email: required("OPERATOR_EMAIL")?,
            admin_email: required("ADMIN_EMAIL")?,
            admin_password: required("ADMIN_PASSWORD")?,
            admin_token_secret: required("ADMIN_TOKEN_SECRET")?,
            admin_token_ttl_secs,
        })
    }
}
