//! Data models for Sharely

pub mod booking;
pub mod item;
pub mod request;
pub mod user;

// Re-export commonly used types
pub use booking::{BookingResponse, BookingShort, BookingState, BookingStatus};
pub use item::{CommentResponse, Item, ItemResponse, ItemSummary};
pub use request::RequestResponse;
pub use user::{User, UserSummary};
