//! Health check handler.

use axum::Json;

use crate::models::MessageResponse;

/// `GET /` — liveness probe.
pub async fn health_handler() -> Json<MessageResponse> {
    Json(MessageResponse {
        success: true,
        message: "API is running".to_string(),
    })
}
