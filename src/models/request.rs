//! Item request (request board) models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::models::{item::ItemForRequest, user::UserSummary};

/// Request row joined with its requestor's name
#[derive(Debug, Clone, FromRow)]
pub struct RequestRow {
    pub id: i32,
    pub description: String,
    pub requestor_id: i32,
    pub requestor_name: String,
    pub created: DateTime<Utc>,
}

/// Create request payload
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRequest {
    #[validate(length(min = 1, message = "Description must not be blank"))]
    pub description: String,
}

/// Request representation returned by the API, with the items that
/// were listed in response to it
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RequestResponse {
    pub id: i32,
    pub description: String,
    pub requestor: UserSummary,
    pub created: DateTime<Utc>,
    pub items: Vec<ItemForRequest>,
}

impl RequestResponse {
    pub fn from_row(row: RequestRow, items: Vec<ItemForRequest>) -> Self {
        RequestResponse {
            id: row.id,
            description: row.description,
            requestor: UserSummary {
                id: row.requestor_id,
                name: row.requestor_name,
            },
            created: row.created,
            items,
        }
    }
}
