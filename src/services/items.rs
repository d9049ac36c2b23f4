//! Item catalog service

use chrono::Utc;
use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::{
        booking::{BookingRow, BookingShort},
        item::{CommentResponse, CreateComment, CreateItem, Item, ItemResponse, UpdateItem},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ItemsService {
    repository: Repository,
}

impl ItemsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Create a new item owned by the given user
    pub async fn add_item(&self, user_id: i32, item: CreateItem) -> AppResult<ItemResponse> {
        item.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if let Some(request_id) = item.request_id {
            // The originating request must exist before the item can claim
            // to fulfill it.
            self.repository.requests.get_by_id(request_id).await?;
        }
        let owner = self.repository.users.get_by_id(user_id).await?;

        tracing::info!("User {} creates item \"{}\"", owner.id, item.name);
        let created = self.repository.items.create(owner.id, &item).await?;
        Ok(created.into())
    }

    /// Update an item; only its owner may do so, and only supplied fields
    /// overwrite
    pub async fn update_item(
        &self,
        item_id: i32,
        user_id: i32,
        update: UpdateItem,
    ) -> AppResult<ItemResponse> {
        self.repository.users.get_by_id(user_id).await?;
        let existing = self.repository.items.get_by_id(item_id).await?;

        if existing.owner_id != user_id {
            return Err(AppError::NotFound(
                "User is not the owner of the item".to_string(),
            ));
        }

        let updated = self.repository.items.update(item_id, &update).await?;
        tracing::info!("Item {} updated by its owner {}", item_id, user_id);
        Ok(updated.into())
    }

    /// Fetch one item with its comments; booking annotations appear when the
    /// requesting user owns the item
    pub async fn get_item(&self, user_id: i32, item_id: i32) -> AppResult<ItemResponse> {
        let item = self.repository.items.get_by_id(item_id).await?;
        self.decorate(item, user_id).await
    }

    /// Page of a user's own items with comments and booking annotations
    pub async fn get_items_by_owner(
        &self,
        user_id: i32,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemResponse>> {
        check_page(from, size)?;
        let items = self
            .repository
            .items
            .find_by_owner(user_id, from, size)
            .await?;

        let mut responses = Vec::with_capacity(items.len());
        for item in items {
            responses.push(self.decorate(item, user_id).await?);
        }
        Ok(responses)
    }

    /// Case-insensitive search over available items; blank text yields an
    /// empty list without error
    pub async fn search_items(
        &self,
        text: Option<&str>,
        from: i64,
        size: i64,
    ) -> AppResult<Vec<ItemResponse>> {
        let text = match text {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Ok(Vec::new()),
        };
        check_page(from, size)?;

        let items = self.repository.items.search(text, from, size).await?;
        Ok(items.into_iter().map(Into::into).collect())
    }

    /// Leave a comment on an item; allowed only after an approved booking by
    /// the author has started
    pub async fn add_comment(
        &self,
        user_id: i32,
        item_id: i32,
        comment: CreateComment,
    ) -> AppResult<CommentResponse> {
        comment
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let now = Utc::now();
        let commented = self
            .repository
            .bookings
            .exists_approved_past(user_id, item_id, now)
            .await?;
        if !commented {
            return Err(AppError::Validation(format!(
                "User {} has no completed booking of item {}",
                user_id, item_id
            )));
        }

        let author = self.repository.users.get_by_id(user_id).await?;
        let item = self.repository.items.get_by_id(item_id).await?;

        tracing::info!("User {} comments on item {}", author.id, item.id);
        let created = self
            .repository
            .items
            .create_comment(item.id, author.id, &comment.text, now)
            .await?;
        Ok(created.into())
    }

    /// Items listed in response to a request
    pub async fn find_by_request_id(&self, request_id: i32) -> AppResult<Vec<Item>> {
        self.repository.items.find_by_request_id(request_id).await
    }

    async fn decorate(&self, item: Item, user_id: i32) -> AppResult<ItemResponse> {
        let now = Utc::now();
        let last = self
            .repository
            .bookings
            .find_last_for_item(item.id, user_id, now)
            .await?;
        let next = self
            .repository
            .bookings
            .find_next_for_item(item.id, user_id, now)
            .await?;
        let comments = self
            .repository
            .items
            .find_comments_by_item(item.id)
            .await?;

        let mut response = ItemResponse::from(item);
        response.last_booking = last.map(to_short);
        response.next_booking = next.map(to_short);
        response.comments = comments.into_iter().map(Into::into).collect();
        Ok(response)
    }
}

fn to_short(row: BookingRow) -> BookingShort {
    BookingShort {
        id: row.id,
        booker_id: row.booker_id,
        start: row.start_date,
        end: row.end_date,
    }
}

fn check_page(from: i64, size: i64) -> AppResult<()> {
    if from < 0 || size < 1 {
        return Err(AppError::Validation("Invalid page parameters".to_string()));
    }
    Ok(())
}
