//! Item requests repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::request::RequestRow,
};

const REQUEST_SELECT: &str = r#"
    SELECT r.id, r.description, r.requestor_id, u.name AS requestor_name, r.created
    FROM requests r
    JOIN users u ON r.requestor_id = u.id
"#;

#[derive(Clone)]
pub struct RequestsRepository {
    pool: Pool<Postgres>,
}

impl RequestsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get request by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<RequestRow> {
        let sql = format!("{REQUEST_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, RequestRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Request with id {} not found", id)))
    }

    /// Create a new request
    pub async fn create(
        &self,
        requestor_id: i32,
        description: &str,
        created: DateTime<Utc>,
    ) -> AppResult<RequestRow> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO requests (description, requestor_id, created)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(description)
        .bind(requestor_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;

        self.get_by_id(id).await
    }

    /// Requests posted by a user, newest first
    pub async fn find_by_requestor(&self, requestor_id: i32) -> AppResult<Vec<RequestRow>> {
        let sql = format!("{REQUEST_SELECT} WHERE r.requestor_id = $1 ORDER BY r.created DESC");
        let requests = sqlx::query_as::<_, RequestRow>(&sql)
            .bind(requestor_id)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }

    /// Page of requests posted by other users, newest first
    pub async fn find_all_excluding(
        &self,
        user_id: i32,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<RequestRow>> {
        let sql = format!(
            "{REQUEST_SELECT} WHERE r.requestor_id != $1 \
             ORDER BY r.created DESC OFFSET $2 LIMIT $3"
        );
        let requests = sqlx::query_as::<_, RequestRow>(&sql)
            .bind(user_id)
            .bind(from)
            .bind(size)
            .fetch_all(&self.pool)
            .await?;
        Ok(requests)
    }
}
