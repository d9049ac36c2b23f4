//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{bookings, health, items, requests, users};
use crate::error::{ErrorResponse, UnsupportedStatusResponse};
use crate::models;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Sharely API",
        version = "1.0.0",
        description = "Item Sharing Service REST API",
        license(name = "MIT")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Users
        users::create_user,
        users::get_all_users,
        users::get_user,
        users::update_user,
        users::remove_user,
        // Items
        items::add_item,
        items::update_item,
        items::get_item,
        items::get_items_by_owner,
        items::search_items,
        items::add_comment,
        // Bookings
        bookings::add_booking,
        bookings::update_booking_status,
        bookings::get_booking,
        bookings::get_bookings_by_booker,
        bookings::get_bookings_by_owner,
        // Requests
        requests::create_request,
        requests::get_user_requests,
        requests::get_all_requests,
        requests::get_request,
    ),
    components(
        schemas(
            health::HealthResponse,
            ErrorResponse,
            UnsupportedStatusResponse,
            models::user::User,
            models::user::UserSummary,
            models::user::CreateUser,
            models::user::UpdateUser,
            models::item::Item,
            models::item::ItemSummary,
            models::item::CreateItem,
            models::item::UpdateItem,
            models::item::ItemResponse,
            models::item::ItemForRequest,
            models::item::CreateComment,
            models::item::CommentResponse,
            models::booking::BookingStatus,
            models::booking::CreateBooking,
            models::booking::BookingResponse,
            models::booking::BookingShort,
            models::request::CreateRequest,
            models::request::RequestResponse,
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "users", description = "User directory"),
        (name = "items", description = "Item catalog"),
        (name = "bookings", description = "Booking ledger"),
        (name = "requests", description = "Request board")
    )
)]
pub struct ApiDoc;

/// Create the Swagger UI router
pub fn create_openapi_router() -> Router {
    Router::new().merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
