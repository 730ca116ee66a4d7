//! Application state shared by every route

use crate::repositories::BookRepository;
use sqlx::MySqlPool;

/// State shared between all routes.
///
/// Generic over the book store so the same routes can run against MySQL or
/// any other `BookStore` implementation.
pub struct AppState<R = BookRepository> {
    /// Book persistence
    pub books: R,
}

impl AppState<BookRepository> {
    /// Builds the state on top of a MySQL connection pool
    pub fn new(pool: MySqlPool) -> Self {
        Self {
            books: BookRepository::new(pool),
        }
    }
}

impl<R> AppState<R> {
    pub fn with_store(books: R) -> Self {
        Self { books }
    }
}
