//! Book catalogue service - library exposing the modules used by the binary and the tests

pub mod core;
pub mod dtos;
pub mod entities;
pub mod repositories;
pub mod services;

// Re-exports of the main types
pub use crate::core::{AppError, AppState, Config};
pub use services::root;

use axum::{Router, routing::get};
use repositories::BookStore;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Builds the application router
pub fn create_router<R: BookStore>(state: Arc<AppState<R>>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .nest("/books", configure_book_routes::<R>())
        .layer(cors)
        .with_state(state)
}

/// Routes of the book catalogue
fn configure_book_routes<R: BookStore>() -> Router<Arc<AppState<R>>> {
    use services::*;

    Router::new()
        .route("/", get(list_books::<R>).post(create_book::<R>))
        .route(
            "/{book_id}",
            get(get_book::<R>)
                .put(replace_book::<R>)
                .patch(patch_book::<R>)
                .delete(delete_book::<R>),
        )
}
