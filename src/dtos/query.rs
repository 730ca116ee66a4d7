//! Query DTOs - query string parameters

use serde::{Deserialize, Serialize};

/// Query parameters accepted by `GET /books`.
///
/// Values are kept as raw strings: a value that does not parse is ignored by
/// the filter builder instead of rejecting the whole request.
#[derive(Serialize, Deserialize, Debug, Default, Clone)]
pub struct BookSearchQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub isbn: Option<String>,
    #[serde(rename = "publishedDate")]
    pub published_date: Option<String>,
    pub price: Option<String>,
    pub rating: Option<String>,
    pub visible: Option<String>,
}
