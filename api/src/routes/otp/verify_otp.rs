use actix_web::{web, HttpResponse};
use validator::Validate;

use ev_core::errors::DomainError;

use crate::app::AppState;
use crate::dto::{ApiResponse, VerifyOtpRequest};
use crate::handlers::ApiError;

/// Handler for POST /verify-otp
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "otp": "123456" }
/// ```
///
/// ## Errors
/// - 400 malformed input or wrong code
/// - 403 attempts exhausted
/// - 404 no active code
/// - 409 already verified
pub async fn verify_otp(
    state: web::Data<AppState>,
    request: web::Json<VerifyOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|e| DomainError::validation(format!("Invalid request: {}", e)))?;

    state
        .verification
        .verify_code(&request.email, &request.otp)
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Email verified successfully")))
}
