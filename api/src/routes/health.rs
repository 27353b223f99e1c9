use actix_web::{web, HttpResponse};

use crate::app::AppState;

/// Handler for GET /health
///
/// Reports whether the storage backend answers.
pub async fn health_check(state: web::Data<AppState>) -> HttpResponse {
    let backend = state.verification.backend_name();

    match state.verification.health_check().await {
        Ok(true) => HttpResponse::Ok().json(serde_json::json!({
            "status": "healthy",
            "backend": backend,
            "version": env!("CARGO_PKG_VERSION"),
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
        Ok(false) | Err(_) => HttpResponse::ServiceUnavailable().json(serde_json::json!({
            "status": "unhealthy",
            "backend": backend,
            "timestamp": chrono::Utc::now().to_rfc3339(),
        })),
    }
}
