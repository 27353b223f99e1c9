//! Application state and factory
//!
//! This module holds the shared state handed to every handler and the
//! route configuration used by both the binary and the API tests.

use std::sync::Arc;

use actix_web::{error::InternalError, web, HttpResponse};

use ev_core::repositories::OtpRepository;
use ev_core::services::{EmailNotifier, VerificationService};

use crate::dto::ApiResponse;
use crate::routes::{health::health_check, otp};

/// Verification service over the backend and notifier selected at startup
pub type OtpService = VerificationService<dyn OtpRepository, dyn EmailNotifier>;

/// Application state that holds shared services
pub struct AppState {
    pub verification: Arc<OtpService>,
}

impl AppState {
    pub fn new(verification: Arc<OtpService>) -> Self {
        Self { verification }
    }
}

/// Register state, JSON handling and routes
pub fn configure(cfg: &mut web::ServiceConfig, state: web::Data<AppState>, max_payload_size: usize) {
    let json_config = web::JsonConfig::default()
        .limit(max_payload_size)
        .error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected malformed request body");
            let response = HttpResponse::BadRequest().json(ApiResponse::failure("Invalid request body"));
            InternalError::from_response(err, response).into()
        });

    cfg.app_data(state)
        .app_data(json_config)
        .route("/health", web::get().to(health_check))
        .route("/send-otp", web::post().to(otp::send_otp))
        .route("/verify-otp", web::post().to(otp::verify_otp));
}
