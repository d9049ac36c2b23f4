//! Booking ledger endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::booking::{BookingListQuery, BookingResponse, CreateBooking},
};

use super::SharerUserId;

/// Approve/reject query parameter
#[derive(Debug, Deserialize, IntoParams)]
pub struct ApprovedQuery {
    pub approved: bool,
}

/// Create a booking
#[utoipa::path(
    post,
    path = "/bookings",
    tag = "bookings",
    request_body = CreateBooking,
    params(
        ("X-Sharer-User-Id" = i32, Header, description = "Booker user ID")
    ),
    responses(
        (status = 201, description = "Booking created in WAITING status", body = BookingResponse),
        (status = 400, description = "Bad booking window or unavailable item"),
        (status = 404, description = "User or item not found, or item belongs to the caller")
    )
)]
pub async fn add_booking(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Json(draft): Json<CreateBooking>,
) -> AppResult<(StatusCode, Json<BookingResponse>)> {
    let created = state
        .services
        .bookings
        .create_booking(user_id, draft)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Approve or reject a waiting booking (item owner only)
#[utoipa::path(
    patch,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i32, Header, description = "Owner user ID"),
        ApprovedQuery
    ),
    responses(
        (status = 200, description = "Booking status updated", body = BookingResponse),
        (status = 400, description = "Booking already decided"),
        (status = 404, description = "Booking not found or caller is not the owner")
    )
)]
pub async fn update_booking_status(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<i32>,
    Query(query): Query<ApprovedQuery>,
) -> AppResult<Json<BookingResponse>> {
    let updated = state
        .services
        .bookings
        .update_booking_status(user_id, booking_id, query.approved)
        .await?;
    Ok(Json(updated))
}

/// Get one booking (booker or item owner only)
#[utoipa::path(
    get,
    path = "/bookings/{id}",
    tag = "bookings",
    params(
        ("id" = i32, Path, description = "Booking ID"),
        ("X-Sharer-User-Id" = i32, Header, description = "Caller user ID")
    ),
    responses(
        (status = 200, description = "Booking details", body = BookingResponse),
        (status = 404, description = "Booking not found or not visible to the caller")
    )
)]
pub async fn get_booking(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Path(booking_id): Path<i32>,
) -> AppResult<Json<BookingResponse>> {
    let booking = state
        .services
        .bookings
        .get_booking_by_id(user_id, booking_id)
        .await?;
    Ok(Json(booking))
}

/// List the caller's bookings, filtered by state
#[utoipa::path(
    get,
    path = "/bookings",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i32, Header, description = "Booker user ID"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings ordered by start descending", body = Vec<BookingResponse>),
        (status = 400, description = "Invalid page parameters"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Unknown state filter")
    )
)]
pub async fn get_bookings_by_booker(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = state
        .services
        .bookings
        .get_bookings_by_booker(
            user_id,
            query.state.as_deref().unwrap_or("ALL"),
            query.from.unwrap_or(0),
            query.size.unwrap_or(10),
        )
        .await?;
    Ok(Json(bookings))
}

/// List bookings of the caller's items, filtered by state
#[utoipa::path(
    get,
    path = "/bookings/owner",
    tag = "bookings",
    params(
        ("X-Sharer-User-Id" = i32, Header, description = "Owner user ID"),
        BookingListQuery
    ),
    responses(
        (status = 200, description = "Bookings ordered by start descending", body = Vec<BookingResponse>),
        (status = 400, description = "Invalid page parameters"),
        (status = 404, description = "User not found"),
        (status = 500, description = "Unknown state filter")
    )
)]
pub async fn get_bookings_by_owner(
    State(state): State<crate::AppState>,
    SharerUserId(user_id): SharerUserId,
    Query(query): Query<BookingListQuery>,
) -> AppResult<Json<Vec<BookingResponse>>> {
    let bookings = state
        .services
        .bookings
        .get_bookings_by_owner(
            user_id,
            query.state.as_deref().unwrap_or("ALL"),
            query.from.unwrap_or(0),
            query.size.unwrap_or(10),
        )
        .await?;
    Ok(Json(bookings))
}
