use actix_web::{
    http::{header, StatusCode},
    HttpResponse, ResponseError,
};
use ev_core::errors::DomainError;

use crate::dto::ErrorResponse;

/// Domain failure surfaced through the HTTP layer
#[derive(Debug, thiserror::Error)]
#[error(transparent)]
pub struct ApiError(#[from] pub DomainError);

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match &self.0 {
            DomainError::Validation { .. } => StatusCode::BAD_REQUEST,
            DomainError::Mismatch { .. } => StatusCode::BAD_REQUEST,
            DomainError::Throttled { .. } => StatusCode::TOO_MANY_REQUESTS,
            DomainError::NotFound => StatusCode::NOT_FOUND,
            DomainError::AlreadyVerified => StatusCode::CONFLICT,
            DomainError::AttemptsExhausted => StatusCode::FORBIDDEN,
            DomainError::Delivery { .. } => StatusCode::BAD_GATEWAY,
            DomainError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self.0, code = self.0.error_code(), "Request failed");
        } else {
            tracing::debug!(error = %self.0, code = self.0.error_code(), "Request rejected");
        }

        // Infrastructure details stay in the log
        let message = match &self.0 {
            DomainError::Storage { .. } => "Internal server error".to_string(),
            DomainError::Delivery { .. } => "Failed to send verification email".to_string(),
            other => other.to_string(),
        };

        let mut response = HttpResponse::build(status);
        if let DomainError::Throttled { retry_after_secs } = &self.0 {
            response.insert_header((header::RETRY_AFTER, retry_after_secs.to_string()));
        }
        response.json(ErrorResponse::new(self.0.error_code(), message))
    }
}
