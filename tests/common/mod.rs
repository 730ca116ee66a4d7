#![allow(dead_code)]

use axum_test::TestServer;
use catalogue::core::AppState;
use catalogue::dtos::{BookDTO, CreateBookDTO};
use catalogue::entities::Book;
use catalogue::repositories::{
    BookField, Create, Delete, Read, Search, SearchOperation, SearchStatement, SearchValue, Update,
};
use serde_json::{Value, json};
use sqlx::MySqlPool;
use std::cmp::Ordering as Compare;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex};

/// In-memory book store used to exercise the routes without MySQL.
///
/// Its filtering mirrors the SQL emitted by `push_criteria`: text compares
/// ignoring case, a NULL column never matches. The MySQL-backed suite in
/// `api_books_mysql.rs` runs the same filter scenarios against the real query.
#[derive(Default)]
pub struct MemoryBookStore {
    books: Mutex<BTreeMap<i64, Book>>,
    last_id: AtomicI64,
}

impl MemoryBookStore {
    pub fn count(&self) -> usize {
        self.books.lock().unwrap().len()
    }
}

impl Create<Book, CreateBookDTO> for MemoryBookStore {
    async fn create(&self, data: &CreateBookDTO) -> Result<Book, sqlx::Error> {
        let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
        let book = Book {
            id,
            title: data.title.clone(),
            author: data.author.clone(),
            published: data.published,
            category: data.category.clone(),
            isbn: data.isbn.clone(),
            rating: data.rating,
            visible: data.visible,
            price: data.price,
            stock: data.stock,
        };
        self.books.lock().unwrap().insert(id, book.clone());
        Ok(book)
    }
}

impl Read<Book, i64> for MemoryBookStore {
    async fn read(&self, id: &i64) -> Result<Option<Book>, sqlx::Error> {
        Ok(self.books.lock().unwrap().get(id).cloned())
    }
}

impl Search<Book, SearchStatement> for MemoryBookStore {
    async fn read_all(&self) -> Result<Vec<Book>, sqlx::Error> {
        Ok(self.books.lock().unwrap().values().cloned().collect())
    }

    async fn search(&self, criteria: &[SearchStatement]) -> Result<Vec<Book>, sqlx::Error> {
        Ok(self
            .books
            .lock()
            .unwrap()
            .values()
            .filter(|book| criteria.iter().all(|c| book_matches(c, book)))
            .cloned()
            .collect())
    }
}

impl Update<Book, BookDTO, i64> for MemoryBookStore {
    async fn update(&self, id: &i64, data: &BookDTO) -> Result<Book, sqlx::Error> {
        let mut books = self.books.lock().unwrap();
        let book = books.get_mut(id).ok_or(sqlx::Error::RowNotFound)?;
        *book = Book {
            id: *id,
            title: data.title.clone(),
            author: data.author.clone(),
            published: data.published,
            category: data.category.clone(),
            isbn: data.isbn.clone(),
            rating: data.rating,
            visible: data.visible,
            price: data.price,
            stock: data.stock,
        };
        Ok(book.clone())
    }
}

impl Delete<i64> for MemoryBookStore {
    async fn delete(&self, id: &i64) -> Result<(), sqlx::Error> {
        self.books.lock().unwrap().remove(id);
        Ok(())
    }
}

/// Evaluates one criterion against a book the way the SQL `WHERE` clause does
fn book_matches(statement: &SearchStatement, book: &Book) -> bool {
    let ordering = match (statement.field, &statement.value) {
        (BookField::Title, SearchValue::Text(v)) => compare_text(statement, &book.title, v),
        (BookField::Author, SearchValue::Text(v)) => compare_text(statement, &book.author, v),
        (BookField::Category, SearchValue::Text(v)) => compare_text(statement, &book.category, v),
        (BookField::Isbn, SearchValue::Text(v)) => compare_text(statement, &book.isbn, v),
        (BookField::Published, SearchValue::Date(v)) => book.published.map(|a| a.cmp(v)),
        (BookField::Price, SearchValue::Decimal(v)) => book.price.and_then(|a| a.partial_cmp(v)),
        (BookField::Rating, SearchValue::Integer(v)) => book.rating.map(|a| a.cmp(v)),
        (BookField::Visible, SearchValue::Flag(v)) => book.visible.map(|a| a.cmp(v)),
        _ => None,
    };

    match (statement.operation, ordering) {
        (_, None) => false,
        (SearchOperation::GreaterThanEqual, Some(ordering)) => ordering != Compare::Less,
        (_, Some(ordering)) => ordering == Compare::Equal,
    }
}

/// Substring matches report `Equal` when the column contains the value
fn compare_text(
    statement: &SearchStatement,
    actual: &Option<String>,
    expected: &str,
) -> Option<Compare> {
    let actual = actual.as_deref()?.to_lowercase();
    let expected = expected.to_lowercase();
    match statement.operation {
        SearchOperation::Match if actual.contains(&expected) => Some(Compare::Equal),
        SearchOperation::Match => Some(Compare::Less),
        _ => Some(actual.as_str().cmp(expected.as_str())),
    }
}

/// Creates a TestServer backed by a fresh in-memory store
///
/// # Returns
/// The server and the state, so tests can inspect the store directly
pub fn create_test_server() -> (TestServer, Arc<AppState<MemoryBookStore>>) {
    let state = Arc::new(AppState::with_store(MemoryBookStore::default()));
    let app = catalogue::create_router(state.clone());
    let server = TestServer::new(app).expect("Failed to create test server");
    (server, state)
}

/// Creates a TestServer backed by MySQL, for `#[sqlx::test]` suites
///
/// # Arguments
/// * `pool` - Connection pool of the throwaway test database
pub fn create_db_test_server(pool: MySqlPool) -> TestServer {
    let state = Arc::new(AppState::new(pool));
    let app = catalogue::create_router(state);
    TestServer::new(app).expect("Failed to create test server")
}

/// A complete, valid creation request
pub fn book_request(title: &str, author: &str, category: &str, rating: i32) -> Value {
    json!({
        "title": title,
        "author": author,
        "published": "2001-05-04",
        "category": category,
        "isbn": format!("isbn-{}", title.len()),
        "rating": rating,
        "price": 19.5,
        "stock": 6,
        "visible": true
    })
}

/// Creates a book through the API and returns its JSON representation
pub async fn create_book(server: &TestServer, request: &Value) -> Value {
    let response = server.post("/books").json(request).await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

/// Seeds the catalogue used by the filter tests
pub async fn seed_catalogue(server: &TestServer) {
    let books = [
        json!({
            "title": "Harry Potter and the Philosopher's Stone",
            "author": "J. K. Rowling",
            "published": "1997-06-26",
            "category": "Fantasy",
            "isbn": "978-0747532699",
            "rating": 5,
            "price": 20.5,
            "stock": 10,
            "visible": true
        }),
        json!({
            "title": "Harry Potter and the Chamber of Secrets",
            "author": "J. K. Rowling",
            "published": "1998-07-02",
            "category": "Fantasy",
            "isbn": "978-0747538493",
            "rating": 2,
            "price": 18.0,
            "stock": 4,
            "visible": true
        }),
        json!({
            "title": "The Hobbit",
            "author": "J. R. R. Tolkien",
            "published": "1937-09-21",
            "category": "Fantasy",
            "isbn": "978-0261102217",
            "rating": 4,
            "price": 12.5,
            "stock": 7,
            "visible": true
        }),
        json!({
            "title": "Dune",
            "author": "Frank Herbert",
            "published": "1965-08-01",
            "category": "Science Fiction",
            "isbn": "978-0441013593",
            "rating": 3,
            "price": 9.99,
            "stock": 0,
            "visible": false
        }),
    ];

    for book in &books {
        create_book(server, book).await;
    }
}
