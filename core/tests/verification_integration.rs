//! Integration tests for the verification service through the public API

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use ev_core::errors::DomainError;
use ev_core::repositories::InMemoryOtpRepository;
use ev_core::services::{EmailNotifier, VerificationService, VerificationServiceConfig};
use ev_shared::config::OtpConfig;

// Notifier keeping every body it was asked to send
#[derive(Default)]
struct InboxNotifier {
    inbox: Mutex<Vec<(String, String)>>,
}

impl InboxNotifier {
    fn latest_code(&self, address: &str, length: usize) -> Option<String> {
        let inbox = self.inbox.lock().unwrap();
        let (_, body) = inbox.iter().rev().find(|(to, _)| to == address)?;
        body.split(|c: char| !c.is_ascii_digit())
            .find(|run| run.len() == length)
            .map(str::to_string)
    }
}

#[async_trait]
impl EmailNotifier for InboxNotifier {
    async fn send(&self, address: &str, _subject: &str, body_html: &str) -> Result<(), String> {
        self.inbox
            .lock()
            .unwrap()
            .push((address.to_string(), body_html.to_string()));
        Ok(())
    }
}

fn service(
    otp: OtpConfig,
) -> (
    VerificationService<InMemoryOtpRepository, InboxNotifier>,
    Arc<InboxNotifier>,
) {
    let config = VerificationServiceConfig::from(otp);
    let repository = Arc::new(InMemoryOtpRepository::new(config.expiry_window()));
    let notifier = Arc::new(InboxNotifier::default());
    (
        VerificationService::new(repository, notifier.clone(), config),
        notifier,
    )
}

#[tokio::test]
async fn test_generated_code_round_trip() {
    let (service, notifier) = service(OtpConfig::default());

    service.send_code("user@example.com").await.unwrap();
    let code = notifier.latest_code("user@example.com", 6).unwrap();
    assert!(code.chars().all(|c| c.is_ascii_digit()));

    let result = service.verify_code("user@example.com", &code).await.unwrap();
    assert_eq!(result.attempts_used, 1);
    assert_eq!(
        service.verify_code("user@example.com", &code).await.unwrap_err(),
        DomainError::AlreadyVerified
    );
}

#[tokio::test]
async fn test_custom_code_length_and_budget() {
    let (service, notifier) = service(OtpConfig::default().with_code_length(8).with_max_attempts(1));

    service.send_code("user@example.com").await.unwrap();
    let code = notifier.latest_code("user@example.com", 8).unwrap();

    // Six digits no longer match the configured format
    assert!(matches!(
        service.verify_code("user@example.com", "123456").await.unwrap_err(),
        DomainError::Validation { .. }
    ));

    let wrong = if code == "00000000" { "11111111" } else { "00000000" };
    assert_eq!(
        service.verify_code("user@example.com", wrong).await.unwrap_err(),
        DomainError::AttemptsExhausted
    );
}

#[tokio::test]
async fn test_zero_resend_delay_allows_immediate_reissue() {
    let (service, notifier) = service(OtpConfig::default().with_resend_delay_minutes(0));

    service.send_code("user@example.com").await.unwrap();
    service.send_code("user@example.com").await.unwrap();
    let latest = notifier.latest_code("user@example.com", 6).unwrap();

    assert_eq!(notifier.inbox.lock().unwrap().len(), 2);
    assert!(service.verify_code("user@example.com", &latest).await.is_ok());
}
