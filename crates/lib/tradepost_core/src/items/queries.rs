//! Item database queries.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use super::{ItemChanges, ItemError, NewItem};
use crate::models::item::{Item, ItemWithOwner, OwnerSummary};

type ItemRow = (
    String,
    String,
    String,
    f64,
    String,
    bool,
    Option<String>,
    DateTime<Utc>,
);

type ItemWithOwnerRow = (
    String,
    String,
    String,
    f64,
    String,
    bool,
    Option<String>,
    DateTime<Utc>,
    Option<String>,
    Option<String>,
);

const ITEM_COLUMNS: &str =
    "i.id::text, i.title, i.description, i.price, i.category, i.in_stock, \
     i.owner_id::text, i.created_at";

fn row_to_item(row: ItemRow) -> Result<Item, ItemError> {
    let (id, title, description, price, category, in_stock, owner_id, created_at) = row;
    Ok(Item {
        id,
        title,
        description,
        price,
        category: category
            .parse()
            .map_err(|e: crate::models::item::UnknownCategory| ItemError::Internal(e.to_string()))?,
        in_stock,
        owner_id,
        created_at,
    })
}

fn row_to_item_with_owner(row: ItemWithOwnerRow) -> Result<ItemWithOwner, ItemError> {
    let (id, title, description, price, category, in_stock, owner_id, created_at, name, email) =
        row;
    // An owner summary exists only while the owning user row does.
    let owner = match (&owner_id, name, email) {
        (Some(owner_id), Some(name), Some(email)) => Some(OwnerSummary {
            id: owner_id.clone(),
            name,
            email,
        }),
        _ => None,
    };
    Ok(ItemWithOwner {
        item: row_to_item((
            id,
            title,
            description,
            price,
            category,
            in_stock,
            owner_id,
            created_at,
        ))?,
        owner,
    })
}

/// List all items, newest first, with owner summaries.
pub async fn list_items(pool: &PgPool) -> Result<Vec<ItemWithOwner>, ItemError> {
    let rows = sqlx::query_as::<_, ItemWithOwnerRow>(
        "SELECT i.id::text, i.title, i.description, i.price, i.category, i.in_stock, \
                i.owner_id::text, i.created_at, u.name, u.email \
         FROM items i LEFT JOIN users u ON u.id = i.owner_id \
         ORDER BY i.created_at DESC",
    )
    .fetch_all(pool)
    .await?;
    rows.into_iter().map(row_to_item_with_owner).collect()
}

/// Fetch one item with its owner summary.
///
/// A malformed id resolves to `None` — no stored item can carry it.
pub async fn find_item_with_owner(
    pool: &PgPool,
    id: &str,
) -> Result<Option<ItemWithOwner>, ItemError> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(None);
    };
    let row = sqlx::query_as::<_, ItemWithOwnerRow>(
        "SELECT i.id::text, i.title, i.description, i.price, i.category, i.in_stock, \
                i.owner_id::text, i.created_at, u.name, u.email \
         FROM items i LEFT JOIN users u ON u.id = i.owner_id \
         WHERE i.id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(row_to_item_with_owner).transpose()
}

/// Fetch one item without the owner join (for the mutation path).
pub async fn find_item(pool: &PgPool, id: &str) -> Result<Option<Item>, ItemError> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(None);
    };
    let row = sqlx::query_as::<_, ItemRow>(&format!(
        "SELECT {ITEM_COLUMNS} FROM items i WHERE i.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;
    row.map(row_to_item).transpose()
}

/// Insert a new item owned by `owner_id`.
pub async fn insert_item(
    pool: &PgPool,
    id: Uuid,
    owner_id: &str,
    new: &NewItem,
) -> Result<Item, ItemError> {
    let owner = Uuid::parse_str(owner_id)
        .map_err(|e| ItemError::Internal(format!("owner id {owner_id}: {e}")))?;
    let row = sqlx::query_as::<_, ItemRow>(&format!(
        "INSERT INTO items (id, title, description, price, category, in_stock, owner_id) \
         VALUES ($1, $2, $3, $4, $5, $6, $7) \
         RETURNING {ITEM_COLUMNS}"
    ))
    .bind(id)
    .bind(&new.title)
    .bind(&new.description)
    .bind(new.price)
    .bind(new.category.as_str())
    .bind(new.in_stock)
    .bind(owner)
    .fetch_one(pool)
    .await?;
    row_to_item(row)
}

/// Apply a partial update, returning the updated row or `None` if it vanished.
pub async fn update_item(
    pool: &PgPool,
    id: &str,
    changes: &ItemChanges,
) -> Result<Option<Item>, ItemError> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(None);
    };
    let row = sqlx::query_as::<_, ItemRow>(&format!(
        "UPDATE items i SET \
             title = COALESCE($2, title), \
             description = COALESCE($3, description), \
             price = COALESCE($4, price), \
             category = COALESCE($5, category), \
             in_stock = COALESCE($6, in_stock) \
         WHERE i.id = $1 \
         RETURNING {ITEM_COLUMNS}"
    ))
    .bind(id)
    .bind(changes.title.as_deref())
    .bind(changes.description.as_deref())
    .bind(changes.price)
    .bind(changes.category.map(|c| c.as_str()))
    .bind(changes.in_stock)
    .fetch_optional(pool)
    .await?;
    row.map(row_to_item).transpose()
}

/// Delete an item, reporting whether a row was removed.
pub async fn delete_item(pool: &PgPool, id: &str) -> Result<bool, ItemError> {
    let Ok(id) = Uuid::parse_str(id) else {
        return Ok(false);
    };
    let result = sqlx::query("DELETE FROM items WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
