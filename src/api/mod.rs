//! API handlers for Sharely REST endpoints

pub mod bookings;
pub mod health;
pub mod items;
pub mod openapi;
pub mod requests;
pub mod users;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::request::Parts,
};

use crate::error::AppError;

/// Name of the caller-identity header
pub const USER_ID_HEADER: &str = "X-Sharer-User-Id";

/// Extractor for the caller's user id from the identity header.
/// There is no cryptographic authentication; the header carries a plain
/// integer id which every handler passes down to the service layer.
pub struct SharerUserId(pub i32);

#[async_trait]
impl<S> FromRequestParts<S> for SharerUserId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let value = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| {
                AppError::Validation(format!("Missing {} header", USER_ID_HEADER))
            })?;

        let user_id = value.parse::<i32>().map_err(|_| {
            AppError::Validation(format!("{} header must be an integer", USER_ID_HEADER))
        })?;

        Ok(SharerUserId(user_id))
    }
}
