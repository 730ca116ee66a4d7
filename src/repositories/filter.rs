//! Filter builder - turns `GET /books` query parameters into search criteria
//!
//! Each supplied parameter becomes one `SearchStatement`; `push_criteria` folds
//! the statements into a single `WHERE` clause joined with AND. Text
//! comparisons ignore case whatever the column collation.

use crate::dtos::BookSearchQuery;
use chrono::NaiveDate;
use sqlx::{MySql, QueryBuilder};
use tracing::debug;

/// Filterable columns of the `books` table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookField {
    Title,
    Author,
    Category,
    Isbn,
    Published,
    Price,
    Rating,
    Visible,
}

impl BookField {
    pub fn column(self) -> &'static str {
        match self {
            BookField::Title => "title",
            BookField::Author => "author",
            BookField::Category => "category",
            BookField::Isbn => "isbn",
            BookField::Published => "published",
            BookField::Price => "price",
            BookField::Rating => "rating",
            BookField::Visible => "visible",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOperation {
    /// Case-insensitive substring match
    Match,
    /// Equality, case-insensitive for text
    Equal,
    GreaterThanEqual,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SearchValue {
    Text(String),
    Date(NaiveDate),
    Integer(i32),
    Decimal(f64),
    Flag(bool),
}

/// One (field, value, operation) criterion.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchStatement {
    pub field: BookField,
    pub value: SearchValue,
    pub operation: SearchOperation,
}

impl SearchStatement {
    pub fn new(field: BookField, value: SearchValue, operation: SearchOperation) -> Self {
        Self {
            field,
            value,
            operation,
        }
    }
}

/// Builds the criteria for a list query, in parameter order.
///
/// Blank strings and values that fail to parse contribute nothing.
pub fn build_criteria(query: &BookSearchQuery) -> Vec<SearchStatement> {
    let mut criteria = Vec::new();

    if let Some(title) = non_blank(&query.title) {
        criteria.push(SearchStatement::new(
            BookField::Title,
            SearchValue::Text(title.to_string()),
            SearchOperation::Match,
        ));
    }
    if let Some(author) = non_blank(&query.author) {
        criteria.push(SearchStatement::new(
            BookField::Author,
            SearchValue::Text(author.to_string()),
            SearchOperation::Match,
        ));
    }
    if let Some(category) = non_blank(&query.category) {
        criteria.push(SearchStatement::new(
            BookField::Category,
            SearchValue::Text(category.to_string()),
            SearchOperation::Equal,
        ));
    }
    if let Some(isbn) = non_blank(&query.isbn) {
        criteria.push(SearchStatement::new(
            BookField::Isbn,
            SearchValue::Text(isbn.to_string()),
            SearchOperation::Equal,
        ));
    }
    if let Some(date) = parse_param::<NaiveDate>("publishedDate", &query.published_date) {
        criteria.push(SearchStatement::new(
            BookField::Published,
            SearchValue::Date(date),
            SearchOperation::GreaterThanEqual,
        ));
    }
    if let Some(price) = parse_param::<f64>("price", &query.price).filter(|p| p.is_finite()) {
        criteria.push(SearchStatement::new(
            BookField::Price,
            SearchValue::Decimal(price),
            SearchOperation::Equal,
        ));
    }
    if let Some(rating) = parse_param::<i32>("rating", &query.rating) {
        criteria.push(SearchStatement::new(
            BookField::Rating,
            SearchValue::Integer(rating),
            SearchOperation::GreaterThanEqual,
        ));
    }
    if let Some(visible) = parse_flag(&query.visible) {
        criteria.push(SearchStatement::new(
            BookField::Visible,
            SearchValue::Flag(visible),
            SearchOperation::Equal,
        ));
    }

    criteria
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}

fn parse_param<T: std::str::FromStr>(name: &str, value: &Option<String>) -> Option<T> {
    let raw = non_blank(value)?;
    match raw.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(_) => {
            debug!("Ignoring unparseable {} filter: {:?}", name, raw);
            None
        }
    }
}

/// Boolean query values: `true/on/yes/1` and `false/off/no/0`, any case.
fn parse_flag(value: &Option<String>) -> Option<bool> {
    let raw = non_blank(value)?;
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "on" | "yes" | "1" => Some(true),
        "false" | "off" | "no" | "0" => Some(false),
        _ => {
            debug!("Ignoring unparseable visible filter: {:?}", raw);
            None
        }
    }
}

/// Appends ` WHERE <c1> AND <c2> ...` to the query. Nothing is appended for an
/// empty criteria list.
pub fn push_criteria(query_builder: &mut QueryBuilder<'_, MySql>, criteria: &[SearchStatement]) {
    if criteria.is_empty() {
        return;
    }

    query_builder.push(" WHERE ");
    let mut separated = query_builder.separated(" AND ");
    for statement in criteria {
        let column = statement.field.column();
        match (statement.operation, &statement.value) {
            (SearchOperation::Match, SearchValue::Text(text)) => {
                separated.push(format!("LOWER({column}) LIKE LOWER("));
                separated.push_bind_unseparated(like_pattern(text));
                separated.push_unseparated(")");
                continue;
            }
            (SearchOperation::Equal, SearchValue::Text(text)) => {
                separated.push(format!("LOWER({column}) = LOWER("));
                separated.push_bind_unseparated(text.clone());
                separated.push_unseparated(")");
                continue;
            }
            (SearchOperation::GreaterThanEqual, _) => separated.push(format!("{column} >= ")),
            _ => separated.push(format!("{column} = ")),
        };
        match &statement.value {
            SearchValue::Text(text) => separated.push_bind_unseparated(text.clone()),
            SearchValue::Date(date) => separated.push_bind_unseparated(*date),
            SearchValue::Integer(number) => separated.push_bind_unseparated(*number),
            SearchValue::Decimal(number) => separated.push_bind_unseparated(*number),
            SearchValue::Flag(flag) => separated.push_bind_unseparated(*flag),
        };
    }
}

/// `%value%` with LIKE wildcards in the user value escaped.
fn like_pattern(value: &str) -> String {
    let mut pattern = String::with_capacity(value.len() + 2);
    pattern.push('%');
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
