use actix_web::{web, HttpResponse};
use validator::Validate;

use ev_core::errors::DomainError;

use crate::app::AppState;
use crate::dto::{ApiResponse, SendOtpRequest};
use crate::handlers::ApiError;

/// Handler for POST /send-otp
///
/// Issues a new code for the address and emails it.
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com" }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// { "success": true, "message": "Verification code sent" }
/// ```
///
/// ## Errors
/// - 400 malformed address
/// - 429 resend requested too early (with `Retry-After`)
/// - 502 email delivery failed
pub async fn send_otp(
    state: web::Data<AppState>,
    request: web::Json<SendOtpRequest>,
) -> Result<HttpResponse, ApiError> {
    request
        .validate()
        .map_err(|_| DomainError::validation("Invalid email format"))?;

    state.verification.send_code(&request.email).await?;

    Ok(HttpResponse::Ok().json(ApiResponse::success("Verification code sent")))
}
