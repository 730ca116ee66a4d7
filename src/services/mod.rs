//! Services module - HTTP handlers
//!
//! Each submodule holds the endpoints of one resource.

pub mod book;

pub use book::{create_book, delete_book, get_book, list_books, patch_book, replace_book};

use axum::{http::StatusCode, response::IntoResponse};

/// Root endpoint - health check
pub async fn root() -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
