//! Request board endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};

use crate::{
    error::AppResult,
    models::{
        item::PageQuery,
        request::{CreateRequest, RequestResponse},
    },
};

use super::SharerUserId;

/// Post a request for a desired item
#[utoipa::path(
    post,
    path = "/requests",
    tag = "requests",
    request_body = CreateRequest,
    params(
        ("X-Sharer-User-Id" = i32, Header, description = "Requestor user ID")
    ),
    responses(
        (status = 200, description = "Request created", body = RequestResponse),
        (status = 400, description = "Blank description"),
        (status = 404, description = "User not found")
    )
)]
pub async fn create_request(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(request): Json<CreateRequest>,
) -> AppResult<Json<RequestResponse>> {
    let created = state
        .services
        .requests
        .create_request(user_id, request)
        .await?;
    Ok(Json(created))
}

/// List the caller's own requests with responses
#[utoipa::path(
    get,
    path = "/requests",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i32, Header, description = "Requestor user ID")
    ),
    responses(
        (status = 200, description = "Caller's requests, newest first", body = Vec<RequestResponse>),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_user_requests(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
) -> AppResult<Json<Vec<RequestResponse>>> {
    let requests = state.services.requests.get_user_requests(user_id).await?;
    Ok(Json(requests))
}

/// List other users' requests
#[utoipa::path(
    get,
    path = "/requests/all",
    tag = "requests",
    params(
        ("X-Sharer-User-Id" = i32, Header, description = "Caller user ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Other users' requests, newest first", body = Vec<RequestResponse>),
        (status = 400, description = "Invalid page parameters"),
        (status = 404, description = "User not found")
    )
)]
pub async fn get_all_requests(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(page): Query<PageQuery>,
) -> AppResult<Json<Vec<RequestResponse>>> {
    let requests = state
        .services
        .requests
        .get_all_requests(user_id, page.from.unwrap_or(0), page.size.unwrap_or(10))
        .await?;
    Ok(Json(requests))
}

/// Get one request with its responses
#[utoipa::path(
    get,
    path = "/requests/{id}",
    tag = "requests",
    params(
        ("id" = i32, Path, description = "Request ID"),
        ("X-Sharer-User-Id" = i32, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Request details", body = RequestResponse),
        (status = 404, description = "Request or user not found")
    )
)]
pub async fn get_request(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(request_id): Path<i32>,
) -> AppResult<Json<RequestResponse>> {
    let request = state
        .services
        .requests
        .get_request_by_id(user_id, request_id)
        .await?;
    Ok(Json(request))
}
