//! Book services - catalogue operations

use crate::core::patch::apply_merge_patch;
use crate::core::{AppError, AppState};
use crate::dtos::{BookDTO, BookSearchQuery, CreateBookDTO};
use crate::entities::Book;
use crate::repositories::{BookStore, build_criteria};
use axum::{
    body::Bytes,
    extract::{Json, Path, Query, State, rejection::JsonRejection},
    http::{HeaderMap, StatusCode, header},
    response::IntoResponse,
};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};
use validator::Validate;

/// Path ids are taken as text: an id that is not a number cannot match any book.
fn parse_book_id(book_id: &str) -> Option<i64> {
    book_id.parse::<i64>().ok()
}

/// `name: value` pairs for the debug log, credentials replaced by `***`.
fn loggable_headers(headers: &HeaderMap) -> Vec<String> {
    headers
        .iter()
        .map(|(name, value)| {
            let sensitive = [
                header::AUTHORIZATION,
                header::PROXY_AUTHORIZATION,
                header::COOKIE,
                header::SET_COOKIE,
            ]
            .contains(name);
            match value.to_str() {
                _ if sensitive => format!("{}: ***", name),
                Ok(value) => format!("{}: {}", name, value),
                Err(_) => format!("{}: <binary>", name),
            }
        })
        .collect()
}

#[instrument(skip(state, headers, params))]
pub async fn list_books<R: BookStore>(
    State(state): State<Arc<AppState<R>>>,
    headers: HeaderMap,
    Query(params): Query<BookSearchQuery>, // /books?title=...&rating=...
) -> Result<Json<Vec<Book>>, AppError> {
    debug!("headers: {:?}", loggable_headers(&headers));
    // 1. Translate the query parameters into criteria (invalid values are dropped)
    // 2. No criteria: read everything, otherwise search with the conjunction
    // 3. An empty result is still a 200 with an empty array
    let criteria = build_criteria(&params);

    let books = if criteria.is_empty() {
        state.books.read_all().await?
    } else {
        debug!("Searching books with {} criteria", criteria.len());
        state.books.search(&criteria).await?
    };

    info!("Found {} books", books.len());
    Ok(Json(books))
}

#[instrument(skip(state))]
pub async fn get_book<R: BookStore>(
    State(state): State<Arc<AppState<R>>>,
    Path(book_id): Path<String>,
) -> Result<Json<Book>, AppError> {
    info!("Request received for book {}", book_id);
    let id = parse_book_id(&book_id).ok_or_else(|| AppError::not_found("Book not found"))?;

    let book = state.books.read(&id).await?.ok_or_else(|| {
        warn!("Book {} not found", id);
        AppError::not_found("Book not found")
    })?;

    Ok(Json(book))
}

#[instrument(skip(state))]
pub async fn delete_book<R: BookStore>(
    State(state): State<Arc<AppState<R>>>,
    Path(book_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_book_id(&book_id).ok_or_else(|| AppError::not_found("Book not found"))?;

    // A second delete of the same id finds nothing and reports 404
    if state.books.read(&id).await?.is_none() {
        warn!("Book {} not found, nothing deleted", id);
        return Err(AppError::not_found("Book not found"));
    }

    state.books.delete(&id).await?;

    info!("Book {} deleted", id);
    Ok(StatusCode::OK)
}

#[instrument(skip(state, payload))]
pub async fn create_book<R: BookStore>(
    State(state): State<Arc<AppState<R>>>,
    payload: Result<Json<CreateBookDTO>, JsonRejection>,
) -> Result<impl IntoResponse, AppError> {
    // 1. Reject a missing or malformed body
    // 2. Validate presence of every field (strings must be non-blank)
    // 3. Insert, the id is assigned by the database
    let Json(body) = payload.map_err(|e| {
        warn!("Rejected create request body: {}", e);
        AppError::from(e)
    })?;

    body.validate().map_err(|e| {
        warn!("Invalid create request: {}", e);
        AppError::from(e)
    })?;

    let book = state.books.create(&body).await?;

    info!("Book {} created", book.id);
    Ok((StatusCode::CREATED, Json(book)))
}

#[instrument(skip(state, patch))]
pub async fn patch_book<R: BookStore>(
    State(state): State<Arc<AppState<R>>>,
    Path(book_id): Path<String>,
    patch: Bytes, // application/merge-patch+json
) -> Result<Json<Book>, AppError> {
    // 1. Fetch the current book (a missing book is a bad request on this route)
    // 2. Overlay the merge patch on its JSON form and read it back as a book
    // 3. Persist the patched fields in a single write
    let id = parse_book_id(&book_id).ok_or_else(|| AppError::bad_request("Book not found"))?;

    let book = state.books.read(&id).await?.ok_or_else(|| {
        warn!("Book {} not found, patch rejected", id);
        AppError::bad_request("Book not found")
    })?;

    let patched = apply_merge_patch(&book, &patch).map_err(|e| {
        error!("Error updating book {}: {}", id, e);
        AppError::from(e)
    })?;

    let updated = state.books.update(&id, &BookDTO::from(patched)).await?;

    info!("Book {} patched", id);
    Ok(Json(updated))
}

#[instrument(skip(state, payload))]
pub async fn replace_book<R: BookStore>(
    State(state): State<Arc<AppState<R>>>,
    Path(book_id): Path<String>,
    payload: Result<Json<BookDTO>, JsonRejection>,
) -> Result<Json<Book>, AppError> {
    let id = parse_book_id(&book_id).ok_or_else(|| AppError::not_found("Book not found"))?;

    if state.books.read(&id).await?.is_none() {
        warn!("Book {} not found, nothing replaced", id);
        return Err(AppError::not_found("Book not found"));
    }

    // Fields missing from the document are written as nulls
    let Json(body) = payload?;
    let updated = state.books.update(&id, &body).await?;

    info!("Book {} replaced", id);
    Ok(Json(updated))
}
