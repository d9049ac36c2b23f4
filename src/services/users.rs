//! User directory service

use validator::Validate;

use crate::{
    error::{AppError, AppResult},
    models::user::{CreateUser, UpdateUser, User},
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
}

impl UsersService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    /// Register a new user; the email must not be in use
    pub async fn create_user(&self, user: CreateUser) -> AppResult<User> {
        user.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self.repository.users.email_exists(&user.email, None).await? {
            return Err(AppError::Conflict(format!(
                "A user with email {} already exists",
                user.email
            )));
        }

        tracing::info!("Creating user \"{}\"", user.name);
        self.repository.users.create(&user).await
    }

    /// All registered users
    pub async fn get_all_users(&self) -> AppResult<Vec<User>> {
        self.repository.users.get_all().await
    }

    /// Get one user by ID
    pub async fn get_user_by_id(&self, id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(id).await
    }

    /// Update a user profile; only supplied fields overwrite, and the email
    /// must not belong to another user
    pub async fn update_user(&self, id: i32, update: UpdateUser) -> AppResult<User> {
        update
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let existing = self.repository.users.get_by_id(id).await?;

        if let Some(ref email) = update.email {
            if self
                .repository
                .users
                .email_exists(email, Some(existing.id))
                .await?
            {
                return Err(AppError::Conflict(format!(
                    "A user with email {} already exists",
                    email
                )));
            }
        }

        tracing::info!("Updating user {}", id);
        self.repository.users.update(id, &update).await
    }

    /// Delete a user and return the removed record
    pub async fn remove_user(&self, id: i32) -> AppResult<User> {
        let user = self.repository.users.get_by_id(id).await?;
        self.repository.users.delete(id).await?;
        tracing::info!("Removed user {}", id);
        Ok(user)
    }
}
