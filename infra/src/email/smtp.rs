//! SMTP email delivery

use async_trait::async_trait;
use lettre::message::{header, Mailbox, Message};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Tokio1Executor};
use tracing::{error, info};

use ev_core::services::EmailNotifier;
use ev_shared::config::EmailConfig;
use ev_shared::utils::mask_email;

use crate::InfrastructureError;

/// Sends verification emails through an SMTP relay
pub struct SmtpEmailNotifier {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl SmtpEmailNotifier {
    /// Build the STARTTLS transport from configuration
    ///
    /// Credentials are only attached when both username and password are set.
    pub fn new(config: &EmailConfig) -> Result<Self, InfrastructureError> {
        let from = config
            .from
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Config(format!("Invalid SMTP_FROM address: {}", e)))?;

        let builder = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
            .map_err(|e| {
                InfrastructureError::Email(format!("Failed to configure SMTP transport: {}", e))
            })?
            .port(config.smtp_port);

        let builder = if let (Some(username), Some(password)) =
            (&config.smtp_username, &config.smtp_password)
        {
            builder.credentials(Credentials::new(username.to_string(), password.to_string()))
        } else {
            builder
        };

        info!(
            host = %config.smtp_host,
            port = config.smtp_port,
            "SMTP email transport configured"
        );

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }

    /// Build the HTML message
    pub fn build_message(
        &self,
        address: &str,
        subject: &str,
        body_html: &str,
    ) -> Result<Message, InfrastructureError> {
        let to = address
            .parse::<Mailbox>()
            .map_err(|e| InfrastructureError::Email(format!("Invalid recipient address: {}", e)))?;

        Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(subject)
            .header(header::ContentType::TEXT_HTML)
            .body(body_html.to_string())
            .map_err(|e| InfrastructureError::Email(format!("Failed to build email message: {}", e)))
    }

    /// Check that the relay accepts connections
    pub async fn test_connection(&self) -> Result<bool, InfrastructureError> {
        self.transport
            .test_connection()
            .await
            .map_err(|e| InfrastructureError::Email(e.to_string()))
    }
}

#[async_trait]
impl EmailNotifier for SmtpEmailNotifier {
    async fn send(&self, address: &str, subject: &str, body_html: &str) -> Result<(), String> {
        let message = self
            .build_message(address, subject, body_html)
            .map_err(|e| e.to_string())?;

        match self.transport.send(message).await {
            Ok(_) => {
                info!(
                    target: "email_service",
                    provider = "smtp",
                    email = %mask_email(address),
                    "Email sent successfully"
                );
                Ok(())
            }
            Err(e) => {
                error!(
                    target: "email_service",
                    provider = "smtp",
                    email = %mask_email(address),
                    error = %e,
                    "Failed to send email"
                );
                Err(format!("Failed to send email: {}", e))
            }
        }
    }
}
