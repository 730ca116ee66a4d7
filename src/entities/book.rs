//! Book entity - a single row of the `books` table

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every column except `id` is nullable: a full replace may write nulls.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: Option<String>, // unique index on the table
    pub author: Option<String>,
    pub published: Option<NaiveDate>,
    pub category: Option<String>,
    pub isbn: Option<String>,
    pub rating: Option<i32>, // 1..=5 by convention, not enforced
    pub visible: Option<bool>,
    pub price: Option<f64>,
    pub stock: Option<i32>,
}
