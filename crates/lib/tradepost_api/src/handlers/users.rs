//! User administration request handlers (admin-gated by the router).

use axum::extract::{Path, State};
use axum::Json;

use tradepost_core::models::auth::Role;
use tradepost_core::users::{self, UserChanges};

use crate::AppState;
use crate::error::{ApiError, ApiResult};
use crate::models::{MessageResponse, UpdateUserRequest, UserListResponse, UserResponse};

/// `GET /api/users` — list all users.
pub async fn list_users_handler(
    State(state): State<AppState>,
) -> ApiResult<Json<UserListResponse>> {
    let users = users::list_users(&state.pool).await?;
    Ok(Json(UserListResponse {
        success: true,
        count: users.len(),
        users,
    }))
}

/// `GET /api/users/{id}` — fetch a single user.
pub async fn get_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<UserResponse>> {
    let user = users::get_user(&state.pool, &id).await?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// `PUT /api/users/{id}` — partial update of name, email, role.
pub async fn update_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateUserRequest>,
) -> ApiResult<Json<UserResponse>> {
    let role = body
        .role
        .as_deref()
        .map(|raw| {
            raw.parse::<Role>()
                .map_err(|e| ApiError::Validation(e.to_string()))
        })
        .transpose()?;
    let changes = UserChanges {
        name: body.name,
        email: body.email,
        role,
    };
    let user = users::update_user(&state.pool, &id, changes).await?;
    Ok(Json(UserResponse {
        success: true,
        user,
    }))
}

/// `DELETE /api/users/{id}` — delete a user.
pub async fn delete_user_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<MessageResponse>> {
    users::delete_user(&state.pool, &id).await?;
    Ok(Json(MessageResponse {
        success: true,
        message: "User deleted successfully".to_string(),
    }))
}
