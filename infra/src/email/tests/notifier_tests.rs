//! Tests for email notifiers

use ev_core::services::{EmailNotifier, OTP_EMAIL_SUBJECT};
use ev_shared::config::EmailConfig;

use crate::email::{LogEmailNotifier, SmtpEmailNotifier};

fn smtp_config() -> EmailConfig {
    EmailConfig {
        smtp_host: "smtp.example.com".to_string(),
        smtp_port: 587,
        smtp_username: Some("mailer".to_string()),
        smtp_password: Some("secret".to_string()),
        from: "MailCode <no-reply@example.com>".to_string(),
    }
}

#[tokio::test]
async fn test_log_notifier_counts_messages() {
    let notifier = LogEmailNotifier::new();

    notifier
        .send("a@x.com", OTP_EMAIL_SUBJECT, "<p>123456</p>")
        .await
        .unwrap();
    notifier
        .send("b@x.com", OTP_EMAIL_SUBJECT, "<p>654321</p>")
        .await
        .unwrap();

    assert_eq!(notifier.get_message_count(), 2);
}

#[tokio::test]
async fn test_log_notifier_simulated_failure() {
    let notifier = LogEmailNotifier::failing();

    let result = notifier.send("a@x.com", OTP_EMAIL_SUBJECT, "<p>123456</p>").await;
    assert!(result.is_err());
    assert_eq!(notifier.get_message_count(), 0);
}

#[tokio::test]
async fn test_smtp_notifier_builds_html_message() {
    let notifier = SmtpEmailNotifier::new(&smtp_config()).unwrap();

    let message = notifier
        .build_message("a@x.com", OTP_EMAIL_SUBJECT, "<h1>123456</h1>")
        .unwrap();
    let formatted = String::from_utf8(message.formatted()).unwrap();

    assert!(formatted.contains("Subject: Email Verification Code"));
    assert!(formatted.contains("Content-Type: text/html"));
    assert!(formatted.contains("To: a@x.com"));
}

#[tokio::test]
async fn test_smtp_notifier_rejects_bad_recipient() {
    let notifier = SmtpEmailNotifier::new(&smtp_config()).unwrap();

    let result = notifier.send("not-an-address", OTP_EMAIL_SUBJECT, "<p>1</p>").await;
    assert!(result.is_err());
}

#[test]
fn test_smtp_notifier_rejects_bad_sender() {
    let config = EmailConfig {
        from: "nobody".to_string(),
        ..smtp_config()
    };
    assert!(SmtpEmailNotifier::new(&config).is_err());
}
