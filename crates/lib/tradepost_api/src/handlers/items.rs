//! Item request handlers.
//!
//! Reads are public; mutations require an authenticated principal and pass
//! through the ownership check in `tradepost_core::items`.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use tradepost_core::items::{self, ItemChanges, NewItem};
use tradepost_core::models::item::Category;

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::middleware::auth::CurrentUser;
use crate::models::{
    CreateItemRequest, ItemListResponse, ItemResponse, ItemWithOwnerResponse, MessageResponse,
    UpdateItemRequest,
};

fn parse_category(raw: &str) -> ApiResult<Category> {
    raw.parse()
        .map_err(|e: tradepost_core::models::item::UnknownCategory| {
            ApiError::Validation(e.to_string())
        })
}

/// `GET /api/items` — list all items, newest first.
pub async fn list_items_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<ItemListResponse>> {
    let items = items::list_items(&state.pool).await?;
    Ok(Json(ItemListResponse {
        success: true,
        count: items.len(),
        items,
    }))
}

/// `GET /api/items/{id}` — fetch a single item.
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ItemWithOwnerResponse>> {
    let item = items::get_item(&state.pool, &id).await?;
    Ok(Json(ItemWithOwnerResponse {
        success: true,
        item,
    }))
}

/// `POST /api/items` — create an item owned by the caller.
pub async fn create_item_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Json(body): Json<CreateItemRequest>,
) -> ApiResult<(StatusCode, Json<ItemResponse>)> {
    let new = NewItem {
        title: body.title,
        description: body.description,
        price: body.price,
        category: parse_category(&body.category)?,
        in_stock: body.in_stock,
    };
    let item = items::create_item(&state.pool, &user.0, new).await?;
    Ok((
        StatusCode::CREATED,
        Json(ItemResponse {
            success: true,
            item,
        }),
    ))
}

/// `PUT /api/items/{id}` — partial update, owner or admin only.
pub async fn update_item_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
    Json(body): Json<UpdateItemRequest>,
) -> ApiResult<Json<ItemResponse>> {
    let changes = ItemChanges {
        title: body.title,
        description: body.description,
        price: body.price,
        category: body.category.as_deref().map(parse_category).transpose()?,
        in_stock: body.in_stock,
    };
    let item = items::update_item(&state.pool, &user.0, &id, changes).await?;
    Ok(Json(ItemResponse {
        success: true,
        item,
    }))
}

/// `DELETE /api/items/{id}` — delete, owner or admin only.
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Extension(user): Extension<CurrentUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    items::delete_item(&state.pool, &user.0, &id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "Item deleted successfully".to_string(),
    }))
}
