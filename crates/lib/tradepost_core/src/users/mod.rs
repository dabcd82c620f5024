//! User administration logic (admin-gated CRUD).

pub mod queries;

use sqlx::PgPool;
use thiserror::Error;

use crate::models::auth::{Role, User};

/// User administration errors.
#[derive(Debug, Error)]
pub enum UserError {
    #[error("User not found with id {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Partial update payload; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
}

fn validate_changes(changes: &UserChanges) -> Result<(), UserError> {
    if let Some(name) = &changes.name
        && name.trim().is_empty()
    {
        return Err(UserError::Validation("Please provide a name".to_string()));
    }
    if let Some(email) = &changes.email
        && email.trim().is_empty()
    {
        return Err(UserError::Validation("Please provide an email".to_string()));
    }
    Ok(())
}

/// List all users.
pub async fn list_users(pool: &PgPool) -> Result<Vec<User>, UserError> {
    queries::list_users(pool).await
}

/// Fetch a single user.
pub async fn get_user(pool: &PgPool, id: &str) -> Result<User, UserError> {
    queries::find_user_by_id(pool, id)
        .await?
        .ok_or_else(|| UserError::NotFound(id.to_string()))
}

/// Apply a partial update to a user.
pub async fn update_user(
    pool: &PgPool,
    id: &str,
    changes: UserChanges,
) -> Result<User, UserError> {
    validate_changes(&changes)?;
    queries::update_user(pool, id, &changes)
        .await?
        .ok_or_else(|| UserError::NotFound(id.to_string()))
}

/// Delete a user.
pub async fn delete_user(pool: &PgPool, id: &str) -> Result<(), UserError> {
    let deleted = queries::delete_user(pool, id).await?;
    if !deleted {
        return Err(UserError::NotFound(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_rejected() {
        let err = validate_changes(&UserChanges {
            name: Some("  ".to_string()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));

        let err = validate_changes(&UserChanges {
            email: Some(String::new()),
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(err, UserError::Validation(_)));
    }

    #[test]
    fn absent_fields_pass_validation() {
        assert!(validate_changes(&UserChanges::default()).is_ok());
    }
}
