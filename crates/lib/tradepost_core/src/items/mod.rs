//! Item catalog logic.
//!
//! CRUD operations plus the ownership check applied before every mutation.

pub mod queries;

use sqlx::PgPool;
use thiserror::Error;

use crate::models::auth::{Role, User};
use crate::models::item::{Category, Item, ItemWithOwner};

/// Item errors.
#[derive(Debug, Error)]
pub enum ItemError {
    #[error("Item not found with id {0}")]
    NotFound(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    DbError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Field caps mirroring the catalog schema.
const MAX_TITLE_LEN: usize = 100;
const MAX_DESCRIPTION_LEN: usize = 500;

/// New item payload. The owner is always the calling principal, never
/// client-supplied.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub in_stock: bool,
}

/// Partial update payload; `None` fields keep their stored value.
#[derive(Debug, Clone, Default)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub in_stock: Option<bool>,
}

/// Decide whether `principal` may mutate `item`.
///
/// Allowed iff the principal owns the item or holds the admin role. An item
/// without an owner denies every non-admin mutation. Read-only decision; the
/// caller performs the mutation only on `Ok`.
pub fn authorize_mutation(principal: &User, item: &Item) -> Result<(), ItemError> {
    if principal.role == Role::Admin {
        return Ok(());
    }
    if item.owner_id.as_deref() == Some(principal.id.as_str()) {
        return Ok(());
    }
    Err(ItemError::Forbidden(
        "Not authorized to modify this item".to_string(),
    ))
}

fn validate_fields(
    title: Option<&str>,
    description: Option<&str>,
    price: Option<f64>,
) -> Result<(), ItemError> {
    if let Some(title) = title {
        if title.trim().is_empty() {
            return Err(ItemError::Validation("Please provide a title".to_string()));
        }
        if title.len() > MAX_TITLE_LEN {
            return Err(ItemError::Validation(
                "Title cannot exceed 100 characters".to_string(),
            ));
        }
    }
    if let Some(description) = description {
        if description.trim().is_empty() {
            return Err(ItemError::Validation(
                "Please provide a description".to_string(),
            ));
        }
        if description.len() > MAX_DESCRIPTION_LEN {
            return Err(ItemError::Validation(
                "Description cannot exceed 500 characters".to_string(),
            ));
        }
    }
    if let Some(price) = price
        && price < 0.0
    {
        return Err(ItemError::Validation(
            "Price cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// List items, newest first, with owner summaries joined in.
pub async fn list_items(pool: &PgPool) -> Result<Vec<ItemWithOwner>, ItemError> {
    queries::list_items(pool).await
}

/// Fetch a single item with its owner summary.
pub async fn get_item(pool: &PgPool, id: &str) -> Result<ItemWithOwner, ItemError> {
    queries::find_item_with_owner(pool, id)
        .await?
        .ok_or_else(|| ItemError::NotFound(id.to_string()))
}

/// Create an item owned by `principal`.
pub async fn create_item(
    pool: &PgPool,
    principal: &User,
    new: NewItem,
) -> Result<Item, ItemError> {
    validate_fields(
        Some(new.title.as_str()),
        Some(new.description.as_str()),
        Some(new.price),
    )?;
    queries::insert_item(pool, crate::uuid::uuidv7(), &principal.id, &new).await
}

/// Update an item: existence first, then ownership, then the write.
///
/// The fetch-check-write sequence is not atomic against concurrent writers;
/// a row deleted in between surfaces as `NotFound`.
pub async fn update_item(
    pool: &PgPool,
    principal: &User,
    id: &str,
    changes: ItemChanges,
) -> Result<Item, ItemError> {
    validate_fields(
        changes.title.as_deref(),
        changes.description.as_deref(),
        changes.price,
    )?;
    let existing = queries::find_item(pool, id)
        .await?
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    authorize_mutation(principal, &existing)?;
    queries::update_item(pool, &existing.id, &changes)
        .await?
        .ok_or_else(|| ItemError::NotFound(id.to_string()))
}

/// Delete an item: existence first, then ownership, then the delete.
pub async fn delete_item(pool: &PgPool, principal: &User, id: &str) -> Result<(), ItemError> {
    let existing = queries::find_item(pool, id)
        .await?
        .ok_or_else(|| ItemError::NotFound(id.to_string()))?;
    authorize_mutation(principal, &existing)?;
    let deleted = queries::delete_item(pool, &existing.id).await?;
    if !deleted {
        return Err(ItemError::NotFound(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(id: &str, role: Role) -> User {
        User {
            id: id.to_string(),
            name: "Test".to_string(),
            email: format!("{id}@example.com"),
            role,
        }
    }

    fn item(owner_id: Option<&str>) -> Item {
        Item {
            id: "item-1".to_string(),
            title: "Lamp".to_string(),
            description: "A lamp".to_string(),
            price: 10.0,
            category: Category::Other,
            in_stock: true,
            owner_id: owner_id.map(str::to_string),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn owner_may_mutate() {
        assert!(authorize_mutation(&user("u1", Role::User), &item(Some("u1"))).is_ok());
    }

    #[test]
    fn non_owner_is_forbidden() {
        let err = authorize_mutation(&user("u2", Role::User), &item(Some("u1"))).unwrap_err();
        assert!(matches!(err, ItemError::Forbidden(_)));
    }

    #[test]
    fn admin_overrides_ownership() {
        assert!(authorize_mutation(&user("u2", Role::Admin), &item(Some("u1"))).is_ok());
        assert!(authorize_mutation(&user("u2", Role::Admin), &item(None)).is_ok());
    }

    #[test]
    fn ownerless_item_denies_non_admin() {
        let err = authorize_mutation(&user("u1", Role::User), &item(None)).unwrap_err();
        assert!(matches!(err, ItemError::Forbidden(_)));
    }

    #[test]
    fn field_validation_rejects_bad_values() {
        assert!(matches!(
            validate_fields(Some(""), None, None),
            Err(ItemError::Validation(_))
        ));
        let long_title = "x".repeat(101);
        assert!(matches!(
            validate_fields(Some(long_title.as_str()), None, None),
            Err(ItemError::Validation(_))
        ));
        let long_description = "x".repeat(501);
        assert!(matches!(
            validate_fields(None, Some(long_description.as_str()), None),
            Err(ItemError::Validation(_))
        ));
        assert!(matches!(
            validate_fields(None, None, Some(-1.0)),
            Err(ItemError::Validation(_))
        ));
        assert!(validate_fields(Some("Lamp"), Some("A lamp"), Some(0.0)).is_ok());
    }
}
