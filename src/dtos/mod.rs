//! DTOs module - Data Transfer Objects
//!
//! DTOs separate the external (API) representation from the persisted entities.

pub mod book;
pub mod query;

pub use book::{BookDTO, CreateBookDTO};
pub use query::BookSearchQuery;
