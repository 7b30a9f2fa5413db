use crate::engine::AlertEvent;
use crate::error::NotifyError;
use crate::notify::{alert_body, alert_subject, Notifier, SELF_CHECK_BODY, SELF_CHECK_SUBJECT};
use async_trait::async_trait;
use fsw_fred::series::SeriesDescriptor;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use log::info;

/// Standard submission port, used when the environment names none.
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Connection settings for the outgoing mail account. The sender
/// address doubles as the login name.
#[derive(Debug, Clone)]
pub struct SmtpConfig {
    pub server: String,
    pub port: u16,
    pub sender: String,
    pub password: String,
    pub recipient: String,
}

/// Mail delivery over SMTP with STARTTLS.
pub struct SmtpNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    sender: Mailbox,
    recipient: Mailbox,
}

impl SmtpNotifier {
    /// Build the transport and validate both addresses up front, so a
    /// typo in the environment fails at startup instead of at the
    /// first crossing.
    pub fn new(config: &SmtpConfig) -> Result<SmtpNotifier, NotifyError> {
        let sender: Mailbox = config.sender.parse()?;
        let recipient: Mailbox = config.recipient.parse()?;
        let credentials = Credentials::new(config.sender.clone(), config.password.clone());
        let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.server)?
            .port(config.port)
            .credentials(credentials)
            .build();
        Ok(SmtpNotifier {
            transport,
            sender,
            recipient,
        })
    }

    async fn send(&self, subject: &str, body: String) -> Result<(), NotifyError> {
        let message = Message::builder()
            .from(self.sender.clone())
            .to(self.recipient.clone())
            .subject(subject)
            .header(ContentType::TEXT_PLAIN)
            .body(body)?;
        self.transport.send(message).await?;
        info!("email sent successfully to {}", self.recipient);
        Ok(())
    }
}

#[async_trait]
impl Notifier for SmtpNotifier {
    async fn notify(
        &self,
        event: &AlertEvent,
        descriptor: &SeriesDescriptor,
    ) -> Result<(), NotifyError> {
        self.send(&alert_subject(descriptor), alert_body(event, descriptor))
            .await
    }

    async fn self_check(&self) -> Result<(), NotifyError> {
        self.send(SELF_CHECK_SUBJECT, SELF_CHECK_BODY.to_string())
            .await
    }
}

#[cfg(test)]
mod test {
    use super::{SmtpConfig, SmtpNotifier, DEFAULT_SMTP_PORT};
    use crate::error::NotifyError;

    fn config() -> SmtpConfig {
        SmtpConfig {
            server: "smtp.example.com".to_string(),
            port: DEFAULT_SMTP_PORT,
            sender: "monitor@example.com".to_string(),
            password: "hunter2".to_string(),
            recipient: "ops@example.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_new_validates_addresses() {
        assert!(SmtpNotifier::new(&config()).is_ok());

        let mut bad = config();
        bad.recipient = "not an address".to_string();
        assert!(matches!(
            SmtpNotifier::new(&bad),
            Err(NotifyError::Address(_))
        ));
    }
}
