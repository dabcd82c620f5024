//! Item domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Item category (closed catalog taxonomy).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Electronics,
    Clothing,
    Books,
    Food,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Books => "Books",
            Category::Food => "Food",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Electronics" => Ok(Category::Electronics),
            "Clothing" => Ok(Category::Clothing),
            "Books" => Ok(Category::Books),
            "Food" => Ok(Category::Food),
            "Other" => Ok(Category::Other),
            other => Err(UnknownCategory(other.to_string())),
        }
    }
}

/// Error for category strings that name no known category.
#[derive(Debug, Clone, thiserror::Error)]
#[error("unknown category '{0}' (expected one of Electronics, Clothing, Books, Food, Other)")]
pub struct UnknownCategory(pub String);

/// Domain item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub in_stock: bool,
    /// Owning user, if any. Ownerless items deny all non-admin mutation.
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Owner identity joined into item reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OwnerSummary {
    pub id: String,
    pub name: String,
    pub email: String,
}

/// Item plus its owner summary, as returned by read endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ItemWithOwner {
    #[serde(flatten)]
    pub item: Item,
    pub owner: Option<OwnerSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for cat in [
            Category::Electronics,
            Category::Clothing,
            Category::Books,
            Category::Food,
            Category::Other,
        ] {
            assert_eq!(cat.as_str().parse::<Category>().unwrap(), cat);
        }
    }

    #[test]
    fn unknown_category_is_rejected() {
        let err = "Furniture".parse::<Category>().unwrap_err();
        assert!(err.to_string().contains("Furniture"));
    }

    #[test]
    fn item_serializes_camel_case() {
        let item = Item {
            id: "i1".into(),
            title: "Lamp".into(),
            description: "A lamp".into(),
            price: 10.0,
            category: Category::Other,
            in_stock: true,
            owner_id: Some("u1".into()),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["inStock"], true);
        assert_eq!(json["ownerId"], "u1");
        assert_eq!(json["category"], "Other");
        assert!(json.get("createdAt").is_some());
    }
}
