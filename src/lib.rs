//! Sharely Item Sharing Service
//!
//! A REST JSON API server for item sharing: users list items, book items
//! owned by others, post requests for items they need, and comment on
//! items after a completed booking.

use std::sync::Arc;

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod repository;
pub mod services;

pub use config::AppConfig;
pub use error::{AppError, AppResult};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub services: Arc<services::Services>,
}
