//! Authentication service — login/register flows delegating to
//! `tradepost_core::auth`.

use sqlx::PgPool;
use tracing::info;

use tradepost_core::auth::{jwt, password, queries};
use tradepost_core::models::auth::{Role, User};

use crate::error::{ApiError, ApiResult};

/// Register a new user account. The first user gets the admin role.
///
/// Returns the issued access token and the stored user.
pub async fn register(
    pool: &PgPool,
    name: &str,
    email: &str,
    raw_password: &str,
    jwt_secret: &[u8],
) -> ApiResult<(String, User)> {
    if name.trim().is_empty() {
        return Err(ApiError::Validation("Please provide a name".into()));
    }
    if email.trim().is_empty() {
        return Err(ApiError::Validation("Please provide an email".into()));
    }
    if raw_password.len() < 8 {
        return Err(ApiError::Validation(
            "Password must be at least 8 characters".into(),
        ));
    }

    if queries::email_exists(pool, email).await? {
        return Err(ApiError::Validation("Email already registered".into()));
    }

    // First account bootstraps administration; everyone after is a plain user.
    let is_first_user = queries::user_count(pool).await? == 0;
    let role = if is_first_user { Role::Admin } else { Role::User };

    let password_hash = password::hash_password(raw_password)?;
    let user = queries::create_user(pool, name, email, &password_hash, role).await?;

    if is_first_user {
        info!(email, "first user granted admin role");
    }

    let token = jwt::generate_access_token(&user.id, jwt_secret)?;
    Ok((token, user))
}

/// Authenticate with email + password.
///
/// Wrong email and wrong password are indistinguishable to the caller.
pub async fn login(
    pool: &PgPool,
    email: &str,
    raw_password: &str,
    jwt_secret: &[u8],
) -> ApiResult<(String, User)> {
    let Some(found) = queries::find_user_by_email(pool, email).await? else {
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    };

    if !password::verify_password(raw_password, &found.password_hash)? {
        return Err(ApiError::Unauthorized("Invalid credentials".into()));
    }

    let token = jwt::generate_access_token(&found.user.id, jwt_secret)?;
    Ok((token, found.user))
}
