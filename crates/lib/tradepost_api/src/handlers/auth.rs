//! Authentication request handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use axum_extra::extract::cookie::CookieJar;

use tradepost_core::auth::jwt::ACCESS_TOKEN_EXPIRY_SECS;

use crate::AppState;
use crate::error::ApiResult;
use crate::middleware::auth::CurrentUser;
use crate::models::{
    LoginRequest, MessageResponse, RegisterRequest, TokenResponse, UserResponse,
};
use crate::services::{auth, cookies};

/// `POST /api/auth/register` — create a new user account.
///
/// Also sets the auth cookie so browser clients are logged in immediately.
pub async fn register_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, CookieJar, Json<TokenResponse>)> {
    let (token, user) = auth::register(
        &state.pool,
        &body.name,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    let jar = jar.add(cookies::token_cookie(&token, ACCESS_TOKEN_EXPIRY_SECS));
    Ok((
        StatusCode::CREATED,
        jar,
        Json(TokenResponse {
            success: true,
            token,
            user,
        }),
    ))
}

/// `POST /api/auth/login` — authenticate with email + password.
pub async fn login_handler(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<LoginRequest>,
) -> ApiResult<(CookieJar, Json<TokenResponse>)> {
    let (token, user) = auth::login(
        &state.pool,
        &body.email,
        &body.password,
        state.config.jwt_secret.as_bytes(),
    )
    .await?;
    let jar = jar.add(cookies::token_cookie(&token, ACCESS_TOKEN_EXPIRY_SECS));
    Ok((
        jar,
        Json(TokenResponse {
            success: true,
            token,
            user,
        }),
    ))
}

/// `POST /api/auth/logout` — clear the auth cookie.
pub async fn logout_handler(jar: CookieJar) -> (CookieJar, Json<MessageResponse>) {
    let jar = jar.add(cookies::clear_token_cookie());
    (
        jar,
        Json(MessageResponse {
            success: true,
            message: "Logged out".to_string(),
        }),
    )
}

/// `GET /api/auth/me` — the principal resolved for this request.
pub async fn me_handler(Extension(user): Extension<CurrentUser>) -> Json<UserResponse> {
    Json(UserResponse {
        success: true,
        user: user.0,
    })
}
