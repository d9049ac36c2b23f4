//! Items and comments repository for database operations

use chrono::{DateTime, Utc};
use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::item::{CommentRow, CreateItem, Item, UpdateItem},
};

#[derive(Clone)]
pub struct ItemsRepository {
    pool: Pool<Postgres>,
}

impl ItemsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Get item by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Item> {
        sqlx::query_as::<_, Item>(
            "SELECT id, owner_id, name, description, available, request_id FROM items WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))
    }

    /// Create a new item owned by the given user
    pub async fn create(&self, owner_id: i32, item: &CreateItem) -> AppResult<Item> {
        let created = sqlx::query_as::<_, Item>(
            r#"
            INSERT INTO items (owner_id, name, description, available, request_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, owner_id, name, description, available, request_id
            "#,
        )
        .bind(owner_id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .bind(item.request_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    /// Update an existing item; absent fields keep their stored value
    pub async fn update(&self, id: i32, item: &UpdateItem) -> AppResult<Item> {
        let updated = sqlx::query_as::<_, Item>(
            r#"
            UPDATE items
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                available = COALESCE($4, available)
            WHERE id = $1
            RETURNING id, owner_id, name, description, available, request_id
            "#,
        )
        .bind(id)
        .bind(&item.name)
        .bind(&item.description)
        .bind(item.available)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Item with id {} not found", id)))?;
        Ok(updated)
    }

    /// Get items belonging to an owner, ordered by id
    pub async fn find_by_owner(&self, owner_id: i32, from: i64, size: i64) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, owner_id, name, description, available, request_id
            FROM items
            WHERE owner_id = $1
            ORDER BY id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(owner_id)
        .bind(from)
        .bind(size)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Case-insensitive substring search over name and description,
    /// restricted to available items
    pub async fn search(&self, text: &str, from: i64, size: i64) -> AppResult<Vec<Item>> {
        let pattern = format!("%{}%", text.to_lowercase());
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, owner_id, name, description, available, request_id
            FROM items
            WHERE available = TRUE
              AND (LOWER(name) LIKE $1 OR LOWER(description) LIKE $1)
            ORDER BY id
            OFFSET $2 LIMIT $3
            "#,
        )
        .bind(&pattern)
        .bind(from)
        .bind(size)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Get items created in response to a request
    pub async fn find_by_request_id(&self, request_id: i32) -> AppResult<Vec<Item>> {
        let items = sqlx::query_as::<_, Item>(
            r#"
            SELECT id, owner_id, name, description, available, request_id
            FROM items
            WHERE request_id = $1
            ORDER BY id
            "#,
        )
        .bind(request_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    /// Persist a comment and return it with the author's name resolved
    pub async fn create_comment(
        &self,
        item_id: i32,
        author_id: i32,
        text: &str,
        created: DateTime<Utc>,
    ) -> AppResult<CommentRow> {
        let comment = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (text, item_id, author_id, created)
            VALUES ($1, $2, $3, $4)
            RETURNING id, text,
                      (SELECT name FROM users WHERE id = author_id) AS author_name,
                      created
            "#,
        )
        .bind(text)
        .bind(item_id)
        .bind(author_id)
        .bind(created)
        .fetch_one(&self.pool)
        .await?;
        Ok(comment)
    }

    /// Get all comments for an item with author names, oldest first
    pub async fn find_comments_by_item(&self, item_id: i32) -> AppResult<Vec<CommentRow>> {
        let comments = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT c.id, c.text, u.name AS author_name, c.created
            FROM comments c
            JOIN users u ON c.author_id = u.id
            WHERE c.item_id = $1
            ORDER BY c.created
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(comments)
    }
}
