//! Wire models — request bodies and response shapes.
//!
//! Every success body carries `success: true`; failures are emitted by the
//! error channel as `{"success": false, "message": ...}`. Kept separate from
//! the domain models in `tradepost_core::models`.

use serde::{Deserialize, Serialize};

use tradepost_core::models::auth::User;
use tradepost_core::models::item::{Item, ItemWithOwner};

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response to login/register: the bearer token plus the principal.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub success: bool,
    pub token: String,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub success: bool,
    pub user: User,
}

#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub success: bool,
    pub count: usize,
    pub users: Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

/// Admin user update. `role` is a raw string, validated into a `Role`.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateUserRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    pub title: String,
    pub description: String,
    pub price: f64,
    /// Raw category string, validated into a `Category`.
    pub category: String,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub in_stock: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ItemResponse {
    pub success: bool,
    pub item: Item,
}

#[derive(Debug, Serialize)]
pub struct ItemWithOwnerResponse {
    pub success: bool,
    pub item: ItemWithOwner,
}

#[derive(Debug, Serialize)]
pub struct ItemListResponse {
    pub success: bool,
    pub count: usize,
    pub items: Vec<ItemWithOwner>,
}
