//! Item and comment models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::models::booking::BookingShort;

/// Full item model from database
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Item {
    pub id: i32,
    pub owner_id: i32,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i32>,
}

/// Short item representation embedded in booking views
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ItemSummary {
    pub id: i32,
    pub name: String,
}

/// Create item request
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItem {
    #[validate(length(min = 1, message = "Name must not be blank"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: String,
    pub available: bool,
    pub request_id: Option<i32>,
}

/// Update item request (partial, owner only)
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateItem {
    pub name: Option<String>,
    pub description: Option<String>,
    pub available: Option<bool>,
}

/// Item representation returned by the API, decorated with booking
/// annotations and comments where the endpoint provides them
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<i32>,
    pub last_booking: Option<BookingShort>,
    pub next_booking: Option<BookingShort>,
    pub comments: Vec<CommentResponse>,
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        ItemResponse {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
            last_booking: None,
            next_booking: None,
            comments: Vec::new(),
        }
    }
}

/// Item as listed under the request that it fulfills
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemForRequest {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub available: bool,
    pub request_id: Option<i32>,
}

impl From<Item> for ItemForRequest {
    fn from(item: Item) -> Self {
        ItemForRequest {
            id: item.id,
            name: item.name,
            description: item.description,
            available: item.available,
            request_id: item.request_id,
        }
    }
}

/// Comment row joined with its author's name
#[derive(Debug, Clone, FromRow)]
pub struct CommentRow {
    pub id: i32,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

/// Create comment request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateComment {
    #[validate(length(min = 1, message = "Comment text must not be blank"))]
    pub text: String,
}

/// Comment representation returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentResponse {
    pub id: i32,
    pub text: String,
    pub author_name: String,
    pub created: DateTime<Utc>,
}

impl From<CommentRow> for CommentResponse {
    fn from(row: CommentRow) -> Self {
        CommentResponse {
            id: row.id,
            text: row.text,
            author_name: row.author_name,
            created: row.created,
        }
    }
}

/// Pagination query parameters shared by list endpoints
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageQuery {
    pub from: Option<i64>,
    pub size: Option<i64>,
}

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchQuery {
    pub text: Option<String>,
    pub from: Option<i64>,
    pub size: Option<i64>,
}
