//! Logging email notifier
//!
//! Stand-in for SMTP in development: the message is written to the log.
//! The body, which carries the code, is only emitted at debug level.

use async_trait::async_trait;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};

use ev_core::services::EmailNotifier;
use ev_shared::utils::mask_email;

/// Notifier that logs messages instead of delivering them
#[derive(Clone, Default)]
pub struct LogEmailNotifier {
    /// Counter for tracking number of messages "sent"
    message_count: Arc<AtomicU64>,
    /// Whether to simulate failures (for testing)
    simulate_failure: bool,
}

impl LogEmailNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a notifier that fails every send
    pub fn failing() -> Self {
        Self {
            simulate_failure: true,
            ..Self::default()
        }
    }

    /// Get the total number of messages sent
    pub fn get_message_count(&self) -> u64 {
        self.message_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EmailNotifier for LogEmailNotifier {
    async fn send(&self, address: &str, subject: &str, body_html: &str) -> Result<(), String> {
        if self.simulate_failure {
            warn!(
                email = %mask_email(address),
                "Log notifier simulating delivery failure"
            );
            return Err("Simulated email delivery failure".to_string());
        }

        let count = self.message_count.fetch_add(1, Ordering::SeqCst) + 1;

        info!(
            target: "email_service",
            provider = "log",
            email = %mask_email(address),
            subject = subject,
            message_number = count,
            "Email not delivered; logged instead"
        );
        debug!(target: "email_service", body = body_html, "Logged email body");

        Ok(())
    }
}
