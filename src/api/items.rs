//! Item catalog endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::item::{
        CommentResponse, CreateComment, CreateItem, ItemResponse, PageQuery, SearchQuery,
        UpdateItem,
    },
};

use super::SharerUserId;

/// Create a new item
#[utoipa::path(
    post,
    path = "/items",
    tag = "items",
    request_body = CreateItem,
    params(
        ("X-Sharer-User-Id" = i32, Header, description = "Owner user ID")
    ),
    responses(
        (status = 201, description = "Item created", body = ItemResponse),
        (status = 400, description = "Invalid input"),
        (status = 404, description = "Owner or originating request not found")
    )
)]
pub async fn add_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(item): Json<CreateItem>,
) -> AppResult<(StatusCode, Json<ItemResponse>)> {
    let created = state.services.items.add_item(user_id, item).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update an item (owner only, partial)
#[utoipa::path(
    patch,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i32, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i32, Header, description = "Caller user ID")
    ),
    request_body = UpdateItem,
    responses(
        (status = 200, description = "Item updated", body = ItemResponse),
        (status = 404, description = "Item not found or caller is not the owner")
    )
)]
pub async fn update_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i32>,
    Json(update): Json<UpdateItem>,
) -> AppResult<Json<ItemResponse>> {
    let updated = state
        .services
        .items
        .update_item(item_id, user_id, update)
        .await?;
    Ok(Json(updated))
}

/// Get one item with comments and booking annotations
#[utoipa::path(
    get,
    path = "/items/{id}",
    tag = "items",
    params(
        ("id" = i32, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i32, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Item details", body = ItemResponse),
        (status = 404, description = "Item not found")
    )
)]
pub async fn get_item(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i32>,
) -> AppResult<Json<ItemResponse>> {
    let item = state.services.items.get_item(user_id, item_id).await?;
    Ok(Json(item))
}

/// List the caller's items
#[utoipa::path(
    get,
    path = "/items",
    tag = "items",
    params(
        ("X-Sharer-User-Id" = i32, Header, description = "Owner user ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Owner's items", body = Vec<ItemResponse>)
    )
)]
pub async fn get_items_by_owner(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<ItemResponse>>> {
    let items = state
        .services
        .items
        .get_items_by_owner(user_id, page.from.unwrap_or(0), page.size.unwrap_or(10))
        .await?;
    Ok(Json(items))
}

/// Search available items by text
#[utoipa::path(
    get,
    path = "/items/search",
    tag = "items",
    params(SearchQuery),
    responses(
        (status = 200, description = "Matching available items", body = Vec<ItemResponse>)
    )
)]
pub async fn search_items(
    State(state): State<crate::AppState>,
    Query(query): Query<SearchQuery>,
) -> AppResult<Json<Vec<ItemResponse>>> {
    let items = state
        .services
        .items
        .search_items(
            query.text.as_deref(),
            query.from.unwrap_or(0),
            query.size.unwrap_or(10),
        )
        .await?;
    Ok(Json(items))
}

/// Comment on an item after a completed booking
#[utoipa::path(
    post,
    path = "/items/{id}/comment",
    tag = "items",
    params(
        ("id" = i32, Path, description = "Item ID"),
        ("X-Sharer-User-Id" = i32, Header, description = "Author user ID")
    ),
    request_body = CreateComment,
    responses(
        (status = 200, description = "Comment created", body = CommentResponse),
        (status = 400, description = "Blank text or no completed booking"),
        (status = 404, description = "Item or author not found")
    )
)]
pub async fn add_comment(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(item_id): Path<i32>,
    Json(comment): Json<CreateComment>,
) -> AppResult<Json<CommentResponse>> {
    let created = state
        .services
        .items
        .add_comment(user_id, item_id, comment)
        .await?;
    Ok(Json(created))
}
