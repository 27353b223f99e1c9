//! Unit tests for domain errors

use crate::errors::DomainError;

#[test]
fn test_error_messages_are_human_readable() {
    assert_eq!(
        DomainError::Throttled { retry_after_secs: 42 }.to_string(),
        "Please wait 42 seconds before requesting a new code"
    );
    assert_eq!(
        DomainError::Mismatch { remaining_attempts: 2 }.to_string(),
        "Invalid verification code. 2 attempt(s) remaining"
    );
    assert_eq!(
        DomainError::NotFound.to_string(),
        "No verification code found or code has expired"
    );
    assert_eq!(
        DomainError::validation("Invalid email address").to_string(),
        "Validation error: Invalid email address"
    );
}

#[test]
fn test_error_codes_are_distinct() {
    let errors = vec![
        DomainError::validation("x"),
        DomainError::Throttled { retry_after_secs: 1 },
        DomainError::NotFound,
        DomainError::AlreadyVerified,
        DomainError::AttemptsExhausted,
        DomainError::Mismatch { remaining_attempts: 1 },
        DomainError::delivery("x"),
        DomainError::storage("x"),
    ];

    let codes: std::collections::HashSet<_> = errors.iter().map(|e| e.error_code()).collect();
    assert_eq!(codes.len(), errors.len());
}

#[test]
fn test_infrastructure_classification() {
    assert!(DomainError::storage("connection reset").is_infrastructure());
    assert!(DomainError::delivery("smtp timeout").is_infrastructure());
    assert!(!DomainError::NotFound.is_infrastructure());
    assert!(!DomainError::AttemptsExhausted.is_infrastructure());
}
