//! Entities module - persisted domain entities
//!
//! Each entity maps to one table of the database.

pub mod book;

pub use book::Book;
