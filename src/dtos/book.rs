//! Book DTOs - request bodies for creation and full replace

use crate::entities::Book;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// DTO for creating a new book (no id, assigned by the database).
///
/// Every field is optional at the serde level so that a missing field is a
/// validation error rather than a deserialization error.
#[derive(Serialize, Deserialize, Debug, Clone, Default, Validate)]
pub struct CreateBookDTO {
    #[validate(required, custom(function = "not_blank"))]
    pub title: Option<String>,
    #[validate(required, custom(function = "not_blank"))]
    pub author: Option<String>,
    #[validate(required)]
    pub published: Option<NaiveDate>,
    #[validate(required, custom(function = "not_blank"))]
    pub category: Option<String>,
    #[validate(required, custom(function = "not_blank"))]
    pub isbn: Option<String>,
    #[validate(required)]
    pub rating: Option<i32>,
    #[validate(required)]
    pub price: Option<f64>,
    #[validate(required)]
    pub stock: Option<i32>,
    #[validate(required)]
    pub visible: Option<bool>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Complete document for a full replace. Absent fields deserialize to `None`
/// and are written as nulls.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct BookDTO {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published: Option<NaiveDate>,
    pub category: Option<String>,
    pub isbn: Option<String>,
    pub rating: Option<i32>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
    pub visible: Option<bool>,
}

impl From<Book> for BookDTO {
    fn from(value: Book) -> Self {
        Self {
            title: value.title,
            author: value.author,
            published: value.published,
            category: value.category,
            isbn: value.isbn,
            rating: value.rating,
            price: value.price,
            stock: value.stock,
            visible: value.visible,
        }
    }
}
