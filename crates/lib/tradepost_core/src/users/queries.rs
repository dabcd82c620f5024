//! User administration database queries.

use sqlx::PgPool;
use uuid::Uuid;

use super::{UserChanges, UserError};
use crate::models::auth::User;

type UserRow = (String, String, String, String);

fn row_to_user(row: UserRow) -> Result<User, UserError> {
    let (id, name, email, role) = row;
    Ok(User {
        id,
        name,
        email,
        role: role
            .parse()
            .map_err(|e: crate::models::auth::UnknownRole| UserError::Internal(e.to_string()))?,
    })
}

/// List all users, oldest first.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, UserError> {
    let rows = sqlx::query_as::<_, UserRow>(
        "SELECT id::text, name, email, role FROM users ORDER BY created_at",
    )
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(row_to_user).collect()
}

/// Fetch one user by id.
///
/// A malformed id resolves to `None` — no stored user can carry it.
pub async fn find_user_by_id(pool: &PgPool, id: &str) -> Result<Option<User>, UserError> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(None);
    };
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id::text, name, email, role FROM users WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(row_to_user).transpose()
}

/// Apply a partial update, returning the updated row or `None` if absent.
pub async fn update_user(
    pool: &PgPool,
    id: &str,
    changes: &UserChanges,
) -> Result<Option<User>, UserError> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(None);
    };
    let row = sqlx::query_as::<_, UserRow>(
        "UPDATE users SET \
             name = COALESCE($2, name), \
             email = COALESCE($3, email), \
             role = COALESCE($4, role) \
         WHERE id = $1 \
         RETURNING id::text, name, email, role",
    )
    .bind(id)
    .bind(changes.name.as_deref())
    .bind(changes.email.as_deref())
    .bind(changes.role.map(|r| r.as_str()))
    .fetch_optional(pool)
    .await?;
    row.map(row_to_user).transpose()
}

/// Delete a user, reporting whether a row was removed.
pub async fn delete_user(pool: &PgPool, id: &str) -> Result<bool, UserError> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(false);
    };
    let result = sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
