//! Traits for notifier and code generator integration

use async_trait::async_trait;

/// Trait for outbound email delivery
#[async_trait]
pub trait EmailNotifier: Send + Sync {
    /// Deliver an HTML message to an address
    async fn send(&self, address: &str, subject: &str, body_html: &str) -> Result<(), String>;
}

/// Source of one-time codes
pub trait CodeGenerator: Send + Sync {
    /// Produce a new code
    fn generate(&self) -> String;
}
