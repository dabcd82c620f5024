//! Access gate middleware — token extraction, identity resolution, role
//! gating.
//!
//! Two composable stages. `require_auth` verifies the credential and attaches
//! the resolved principal; `require_role` checks that principal against a
//! route group's required role set. Either stage short-circuits the pipeline
//! on failure: no later stage or handler runs.

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;

use tradepost_core::auth::{jwt, queries};
use tradepost_core::models::auth::{RequiredRoles, User};

use crate::AppState;
use crate::error::ApiError;
use crate::services::cookies::TOKEN_COOKIE;

/// Key used to store the resolved principal in request extensions.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Axum middleware: extracts the token (Bearer header, then cookie), verifies
/// it, resolves the subject to a live user, and injects `CurrentUser` into
/// request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())
        .or_else(|| cookie_token(request.headers()))
        .ok_or_else(|| {
            ApiError::Unauthorized("Not authorized to access this route".to_string())
        })?;

    let claims = jwt::verify_access_token(&token, state.config.jwt_secret.as_bytes())
        .map_err(|e| ApiError::Unauthorized(format!("Not authorized to access this route: {e}")))?;

    // A still-valid token whose subject is gone must be indistinguishable
    // from a missing login: 401, never 404.
    let user = queries::get_user_by_id(&state.pool, &claims.sub)
        .await?
        .ok_or_else(|| {
            ApiError::Unauthorized("Not authorized to access this route".to_string())
        })?;

    request.extensions_mut().insert(CurrentUser(user));

    Ok(next.run(request).await)
}

/// Axum middleware: requires the principal resolved by `require_auth` to hold
/// one of the `required` roles.
pub async fn require_role(
    required: RequiredRoles,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let CurrentUser(user) = request.extensions().get::<CurrentUser>().ok_or_else(|| {
        ApiError::Unauthorized("Not authorized to access this route".to_string())
    })?;

    if !required.allows(user.role) {
        return Err(ApiError::Forbidden(format!(
            "User role '{}' is not authorized to access this route (requires one of: {required})",
            user.role
        )));
    }

    Ok(next.run(request).await)
}

/// Token from the `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::to_string)
}

/// Token from the auth cookie. The header takes precedence when both carry
/// tokens.
fn cookie_token(headers: &HeaderMap) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
}
