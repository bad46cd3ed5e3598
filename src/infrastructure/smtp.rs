use crate::domain::ports::{MailMessage, MailTransport};
use crate::error::{Result, StorefrontError};
use async_trait::async_trait;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

/// SMTP mail transport.
///
/// The relay connection is long-lived and shared; each `send` builds one
/// plain-text message from the configured sender address.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpMailer {
    pub fn new(
        host: &str,
        username: impl Into<String>,
        password: impl Into<String>,
        from: &str,
    ) -> Result<Self> {
        let from = from
            .parse()
            .map_err(|_| StorefrontError::Config(format!("Invalid sender address: {from}")))?;

        let transport = AsyncSmtpTransport::<Tokio1Executor>::relay(host)
            .map_err(|e| StorefrontError::Config(format!("SMTP relay setup failed: {e}")))?
            .credentials(Credentials::new(username.into(), password.into()))
            .build();

        Ok(Self { transport, from })
    }
}

#[async_trait]
impl MailTransport for SmtpMailer {
    async fn send(&self, message: &MailMessage) -> Result<()> {
        let to: Mailbox = message.to.parse().map_err(|_| {
            StorefrontError::Notification(format!("Invalid recipient: {}", message.to))
        })?;

        let email = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(&message.subject)
            .body(message.body.clone())
            .map_err(|e| StorefrontError::Notification(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| StorefrontError::Notification(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_invalid_sender() {
        let result = SmtpMailer::new("smtp.example.com", "user", "pass", "not an address");
        assert!(matches!(result, Err(StorefrontError::Config(_))));
    }

    #[tokio::test]
    async fn test_accepts_valid_sender() {
        assert!(SmtpMailer::new("smtp.example.com", "user", "pass", "shop@example.com").is_ok());
    }
}
