//! Application error types — the single channel every failure flows through.
//!
//! Components raise a failure at the point of detection; it travels unchanged
//! in kind to `IntoResponse` below, which is the sole place a wire body is
//! built and a log line emitted.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use tradepost_core::auth::AuthError;
use tradepost_core::items::ItemError;
use tradepost_core::users::UserError;

/// Convenience alias for handler return types.
pub type ApiResult<T> = Result<T, ApiError>;

/// Application-level errors with HTTP status mapping.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal server error")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Validation(m) => (StatusCode::BAD_REQUEST, m.as_str()),
            ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.as_str()),
            ApiError::Unauthorized(m) => (StatusCode::UNAUTHORIZED, m.as_str()),
            ApiError::Forbidden(m) => (StatusCode::FORBIDDEN, m.as_str()),
            // Internal details go to the log, never the body.
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error"),
        };

        match &self {
            ApiError::Internal(detail) => {
                tracing::error!(status = %status, error = %detail, "request failed")
            }
            _ => tracing::warn!(status = %status, message = %message, "request rejected"),
        }

        let body = Json(serde_json::json!({
            "success": false,
            "message": message,
        }));
        (status, body).into_response()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::RowNotFound => ApiError::NotFound("row not found".into()),
            _ => ApiError::Internal(e.to_string()),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::CredentialError => ApiError::Unauthorized("Invalid credentials".into()),
            AuthError::TokenError(msg) => ApiError::Unauthorized(msg),
            AuthError::ValidationError(msg) => ApiError::Validation(msg),
            AuthError::DbError(e) => ApiError::from(e),
            AuthError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<ItemError> for ApiError {
    fn from(e: ItemError) -> Self {
        match e {
            ItemError::NotFound(id) => ApiError::NotFound(format!("Item not found with id {id}")),
            ItemError::Forbidden(msg) => ApiError::Forbidden(msg),
            ItemError::Validation(msg) => ApiError::Validation(msg),
            ItemError::DbError(e) => ApiError::from(e),
            ItemError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<UserError> for ApiError {
    fn from(e: UserError) -> Self {
        match e {
            UserError::NotFound(id) => ApiError::NotFound(format!("User not found with id {id}")),
            UserError::Validation(msg) => ApiError::Validation(msg),
            UserError::DbError(e) => ApiError::from(e),
            UserError::Internal(msg) => ApiError::Internal(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_is_kind_determined() {
        let cases = [
            (ApiError::Validation("v".into()), StatusCode::BAD_REQUEST),
            (ApiError::NotFound("n".into()), StatusCode::NOT_FOUND),
            (ApiError::Unauthorized("u".into()), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("f".into()), StatusCode::FORBIDDEN),
            (
                ApiError::Internal("i".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[tokio::test]
    async fn internal_detail_is_not_leaked() {
        let resp = ApiError::Internal("connection refused at 10.0.0.5".into()).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Internal Server Error");
        assert!(!bytes.windows(8).any(|w| w == b"10.0.0.5"));
    }

    #[test]
    fn core_errors_lift_without_changing_kind() {
        assert!(matches!(
            ApiError::from(ItemError::Forbidden("no".into())),
            ApiError::Forbidden(_)
        ));
        assert!(matches!(
            ApiError::from(ItemError::NotFound("x".into())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(AuthError::TokenError("expired".into())),
            ApiError::Unauthorized(_)
        ));
        assert!(matches!(
            ApiError::from(UserError::NotFound("x".into())),
            ApiError::NotFound(_)
        ));
    }
}
