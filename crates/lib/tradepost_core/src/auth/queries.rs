//! Auth-related database queries.

use sqlx::PgPool;
use uuid::Uuid;

use super::AuthError;
use crate::models::auth::{Role, User, UserWithPassword};

fn parse_role(raw: &str) -> Result<Role, AuthError> {
    raw.parse()
        .map_err(|e: crate::models::auth::UnknownRole| AuthError::Internal(e.to_string()))
}

/// Fetch a user by email, including the password hash, for the login flow.
pub async fn find_user_by_email(
    pool: &PgPool,
    email: &str,
) -> Result<Option<UserWithPassword>, AuthError> {
    let row = sqlx::query_as::<_, (String, String, String, String, String)>(
        "SELECT id::text, name, email, role, password_hash FROM users WHERE email = $1",
    )
    .bind(email)
    .fetch_optional(pool)
    .await?;
    row.map(|(id, name, email, role, password_hash)| {
        Ok(UserWithPassword {
            user: User {
                id,
                name,
                email,
                role: parse_role(&role)?,
            },
            password_hash,
        })
    })
    .transpose()
}

/// Create a new user, returning the stored record.
pub async fn create_user(
    pool: &PgPool,
    name: &str,
    email: &str,
    password_hash: &str,
    role: Role,
) -> Result<User, AuthError> {
    let id = sqlx::query_scalar::<_, String>(
        "INSERT INTO users (name, email, role, password_hash) \
         VALUES ($1, $2, $3, $4) RETURNING id::text",
    )
    .bind(name)
    .bind(email)
    .bind(role.as_str())
    .bind(password_hash)
    .fetch_one(pool)
    .await?;
    Ok(User {
        id,
        name: name.to_string(),
        email: email.to_string(),
        role,
    })
}

/// Fetch a user by id, for resolving a token subject to a live principal.
///
/// A malformed id resolves to `None` — no stored user can carry it.
pub async fn get_user_by_id(pool: &PgPool, user_id: &str) -> Result<Option<User>, AuthError> {
    let Ok(id) = Uuid::parse_str(user_id) else {
        return Ok(None);
    };
    let row = sqlx::query_as::<_, (String, String, String, String)>(
        "SELECT id::text, name, email, role FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(|(id, name, email, role)| {
        Ok(User {
            id,
            name,
            email,
            role: parse_role(&role)?,
        })
    })
    .transpose()
}

/// Check whether an email is already registered.
pub async fn email_exists(pool: &PgPool, email: &str) -> Result<bool, AuthError> {
    let exists =
        sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
            .bind(email)
            .fetch_one(pool)
            .await?;
    Ok(exists)
}

/// Count total users.
pub async fn user_count(pool: &PgPool) -> Result<i64, AuthError> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;
    Ok(count)
}
