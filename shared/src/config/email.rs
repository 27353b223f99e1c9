//! Outbound email configuration

use serde::{Deserialize, Serialize};

/// SMTP settings for delivering verification codes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EmailConfig {
    /// SMTP relay host; empty disables delivery and logs messages instead
    pub smtp_host: String,

    /// SMTP port (STARTTLS submission by default)
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,

    /// SMTP username
    #[serde(default)]
    pub smtp_username: Option<String>,

    /// SMTP password
    #[serde(default)]
    pub smtp_password: Option<String>,

    /// Sender mailbox, e.g. `MailCode <no-reply@example.com>`
    pub from: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            smtp_host: String::new(),
            smtp_port: default_smtp_port(),
            smtp_username: None,
            smtp_password: None,
            from: String::from("no-reply@localhost"),
        }
    }
}

impl EmailConfig {
    /// Create from environment variables
    pub fn from_env() -> Self {
        let smtp_port = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|port| port.parse().ok())
            .unwrap_or_else(default_smtp_port);

        Self {
            smtp_host: std::env::var("SMTP_HOST").unwrap_or_default(),
            smtp_port,
            smtp_username: std::env::var("SMTP_USER").ok(),
            smtp_password: std::env::var("SMTP_PASS").ok(),
            from: std::env::var("SMTP_FROM").unwrap_or_else(|_| "no-reply@localhost".to_string()),
        }
    }

    /// Whether a real SMTP relay is configured
    pub fn is_enabled(&self) -> bool {
        !self.smtp_host.trim().is_empty()
    }
}

fn default_smtp_port() -> u16 {
    587
}
