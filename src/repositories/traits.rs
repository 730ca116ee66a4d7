//! Common repository traits
//!
//! This module defines generic interfaces for database operations. The
//! returned futures are `Send` so that handlers generic over a store can be
//! served by axum.

use crate::dtos::{BookDTO, CreateBookDTO};
use crate::entities::Book;
use crate::repositories::SearchStatement;
use std::future::Future;

/// Trait for creating new entities in the database
///
/// # Type Parameters
/// * `Entity` - Type of the returned entity (with ID assigned by the database)
/// * `CreateDTO` - DTO for creation (without ID, will be automatically generated)
pub trait Create<Entity, CreateDTO> {
    /// Creates a new entity in the database
    ///
    /// # Returns
    /// * `Ok(Entity)` - Created entity with ID assigned by the database
    /// * `Err(sqlx::Error)` - Error during insertion
    fn create(&self, data: &CreateDTO)
    -> impl Future<Output = Result<Entity, sqlx::Error>> + Send;
}

/// Trait for reading a single entity by primary key
pub trait Read<Entity, Id> {
    /// # Returns
    /// * `Ok(Some(Entity))` - Entity found
    /// * `Ok(None)` - No entity with that ID
    /// * `Err(sqlx::Error)` - Error during reading
    fn read(&self, id: &Id) -> impl Future<Output = Result<Option<Entity>, sqlx::Error>> + Send;
}

/// Trait for listing entities, optionally restricted by criteria
pub trait Search<Entity, Criterion> {
    /// Reads every entity
    fn read_all(&self) -> impl Future<Output = Result<Vec<Entity>, sqlx::Error>> + Send;

    /// Reads the entities satisfying all `criteria` (logical AND)
    fn search(
        &self,
        criteria: &[Criterion],
    ) -> impl Future<Output = Result<Vec<Entity>, sqlx::Error>> + Send;
}

/// Trait for updating existing entities
///
/// # Type Parameters
/// * `Entity` - Type of the updated entity
/// * `UpdateDTO` - DTO holding the new values
/// * `Id` - Type of the primary key
pub trait Update<Entity, UpdateDTO, Id> {
    /// # Returns
    /// * `Ok(Entity)` - Updated entity
    /// * `Err(sqlx::Error)` - Error during update (`RowNotFound` if the entity does not exist)
    fn update(
        &self,
        id: &Id,
        data: &UpdateDTO,
    ) -> impl Future<Output = Result<Entity, sqlx::Error>> + Send;
}

/// Trait for deleting entities
pub trait Delete<Id> {
    fn delete(&self, id: &Id) -> impl Future<Output = Result<(), sqlx::Error>> + Send;
}

/// Everything the catalogue routes need from a book store
pub trait BookStore:
    Create<Book, CreateBookDTO>
    + Read<Book, i64>
    + Search<Book, SearchStatement>
    + Update<Book, BookDTO, i64>
    + Delete<i64>
    + Send
    + Sync
    + 'static
{
}

impl<T> BookStore for T where
    T: Create<Book, CreateBookDTO>
        + Read<Book, i64>
        + Search<Book, SearchStatement>
        + Update<Book, BookDTO, i64>
        + Delete<i64>
        + Send
        + Sync
        + 'static
{
}
