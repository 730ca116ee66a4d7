//! Repositories module - persistence layer
//!
//! Each repository owns the database operations of one entity and exposes them
//! through the generic traits in `traits`.
//!
//! Queries are checked at runtime (`sqlx::query` / `query_as::<_, T>` and
//! `QueryBuilder`), so building the crate does not need a live database.

pub mod book;
pub mod filter;
pub mod traits;

pub use traits::{BookStore, Create, Delete, Read, Search, Update};

pub use book::BookRepository;
pub use filter::{
    BookField, SearchOperation, SearchStatement, SearchValue, build_criteria, push_criteria,
};
