//! BookRepository - MySQL persistence for books

use super::{Create, Delete, Read, Search, SearchStatement, Update, push_criteria};
use crate::dtos::{BookDTO, CreateBookDTO};
use crate::entities::Book;
use sqlx::{Error, MySqlPool, QueryBuilder};
use tracing::{debug, info, instrument};

const SELECT_BOOKS: &str = "SELECT id, title, author, published, category, isbn, rating, visible, price, stock FROM books";

pub struct BookRepository {
    connection_pool: MySqlPool,
}

impl BookRepository {
    pub fn new(connection_pool: MySqlPool) -> Self {
        Self { connection_pool }
    }
}

impl Create<Book, CreateBookDTO> for BookRepository {
    #[instrument(skip(self, data), fields(title = ?data.title))]
    async fn create(&self, data: &CreateBookDTO) -> Result<Book, Error> {
        debug!("Inserting new book");
        let result = sqlx::query(
            r#"
            INSERT INTO books (title, author, published, category, isbn, rating, visible, price, stock)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.published)
        .bind(&data.category)
        .bind(&data.isbn)
        .bind(data.rating)
        .bind(data.visible)
        .bind(data.price)
        .bind(data.stock)
        .execute(&self.connection_pool)
        .await?;

        let new_id = result.last_insert_id() as i64;

        info!("Book created with id {}", new_id);

        Ok(Book {
            id: new_id,
            title: data.title.clone(),
            author: data.author.clone(),
            published: data.published,
            category: data.category.clone(),
            isbn: data.isbn.clone(),
            rating: data.rating,
            visible: data.visible,
            price: data.price,
            stock: data.stock,
        })
    }
}

impl Read<Book, i64> for BookRepository {
    #[instrument(skip(self), fields(book_id = %id))]
    async fn read(&self, id: &i64) -> Result<Option<Book>, Error> {
        debug!("Reading book by id");
        let book = sqlx::query_as::<_, Book>(&format!("{SELECT_BOOKS} WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.connection_pool)
            .await?;

        if book.is_none() {
            debug!("Book not found");
        }

        Ok(book)
    }
}

impl Search<Book, SearchStatement> for BookRepository {
    #[instrument(skip(self))]
    async fn read_all(&self) -> Result<Vec<Book>, Error> {
        let books = sqlx::query_as::<_, Book>(&format!("{SELECT_BOOKS} ORDER BY id"))
            .fetch_all(&self.connection_pool)
            .await?;

        debug!("Read {} books", books.len());
        Ok(books)
    }

    #[instrument(skip(self, criteria), fields(criteria = criteria.len()))]
    async fn search(&self, criteria: &[SearchStatement]) -> Result<Vec<Book>, Error> {
        // Build dynamic WHERE clause using QueryBuilder
        let mut query_builder = QueryBuilder::new(SELECT_BOOKS);
        push_criteria(&mut query_builder, criteria);
        query_builder.push(" ORDER BY id");

        let books = query_builder
            .build_query_as::<Book>()
            .fetch_all(&self.connection_pool)
            .await?;

        debug!("Search matched {} books", books.len());
        Ok(books)
    }
}

impl Update<Book, BookDTO, i64> for BookRepository {
    /// Writes all nine mutable columns, nulls included
    #[instrument(skip(self, data), fields(book_id = %id))]
    async fn update(&self, id: &i64, data: &BookDTO) -> Result<Book, Error> {
        debug!("Updating book");
        sqlx::query(
            r#"
            UPDATE books
            SET title = ?, author = ?, published = ?, category = ?, isbn = ?,
                rating = ?, visible = ?, price = ?, stock = ?
            WHERE id = ?
            "#,
        )
        .bind(&data.title)
        .bind(&data.author)
        .bind(data.published)
        .bind(&data.category)
        .bind(&data.isbn)
        .bind(data.rating)
        .bind(data.visible)
        .bind(data.price)
        .bind(data.stock)
        .bind(id)
        .execute(&self.connection_pool)
        .await?;

        info!("Book updated");

        // MySQL reports 0 affected rows for unchanged values, so read back instead
        self.read(id).await?.ok_or(Error::RowNotFound)
    }
}

impl Delete<i64> for BookRepository {
    #[instrument(skip(self), fields(book_id = %id))]
    async fn delete(&self, id: &i64) -> Result<(), Error> {
        sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        info!("Book deleted");
        Ok(())
    }
}
