//! Book Service - data access and transactional logic for the books API.
//!
//! Handlers stay thin; everything that touches the store lives here so the
//! transaction boundaries are visible in one place.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    FromQueryResult, ModelTrait, QueryFilter, Set, Statement, TransactionTrait,
};
use serde::Serialize;

use crate::models::book::{ActiveModel as BookActiveModel, Entity as BookEntity};
use crate::models::book_genres::{
    ActiveModel as BookGenreActiveModel, Column as BookGenreColumn, Entity as BookGenreEntity,
};
use crate::models::Book;

/// Error type for service operations
#[derive(Debug)]
pub enum ServiceError {
    Database(String),
    NotFound,
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self {
        ServiceError::Database(e.to_string())
    }
}

/// One row of the book listing: the book plus its linked genre ids,
/// comma-joined by the store (null when no genres are linked).
#[derive(Debug, Serialize, FromQueryResult)]
pub struct BookWithGenres {
    pub id: i32,
    pub title: String,
    pub author: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub info: Option<String>,
    pub summary: Option<String>,
    pub genres: Option<String>,
}

/// Single-book view: linked genre ids plus genre titles, both comma-joined.
#[derive(Debug, Serialize, FromQueryResult)]
pub struct BookDetail {
    pub id: i32,
    pub title: String,
    pub author: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    pub info: Option<String>,
    pub summary: Option<String>,
    pub genres: Option<String>,
    #[serde(rename = "genresTitle")]
    pub genres_title: Option<String>,
}

#[derive(Debug)]
pub struct CreateBookInput {
    pub title: String,
    pub author: String,
    pub published_at: String,
    pub info: Option<String>,
    pub summary: Option<String>,
    pub genres_id: Option<Vec<i32>>,
}

#[derive(Debug, Default)]
pub struct UpdateBookInput {
    pub title: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<String>,
    pub info: Option<String>,
    pub summary: Option<String>,
    /// `Some(vec![])` replaces the associations with none; `None` leaves
    /// them untouched.
    pub genres_id: Option<Vec<i32>>,
}

/// List all books with their genre ids aggregated per book.
pub async fn list_books(db: &DatabaseConnection) -> Result<Vec<BookWithGenres>, ServiceError> {
    let stmt = Statement::from_string(
        db.get_database_backend(),
        r#"
        SELECT b.id, b.title, b.author, b.published_at, b.info, b.summary,
               GROUP_CONCAT(bg.genre_id, ', ') AS genres
        FROM books b
        LEFT JOIN book_genres bg ON bg.book_id = b.id
        GROUP BY b.id
        "#
        .to_owned(),
    );

    let books = BookWithGenres::find_by_statement(stmt).all(db).await?;
    Ok(books)
}

/// Fetch a single book with its genre ids and titles aggregated.
pub async fn get_book(
    db: &DatabaseConnection,
    id: i32,
) -> Result<Option<BookDetail>, ServiceError> {
    let stmt = Statement::from_sql_and_values(
        db.get_database_backend(),
        r#"
        SELECT b.id, b.title, b.author, b.published_at, b.info, b.summary,
               GROUP_CONCAT(bg.genre_id, ', ') AS genres,
               GROUP_CONCAT(g.title, ', ') AS genres_title
        FROM books b
        LEFT JOIN book_genres bg ON bg.book_id = b.id
        LEFT JOIN genres g ON g.id = bg.genre_id
        WHERE b.id = ?
        GROUP BY b.id
        "#,
        [id.into()],
    );

    let book = BookDetail::find_by_statement(stmt).one(db).await?;
    Ok(book)
}

/// Create a book and link its genres in one transaction.
///
/// If any genre link fails (e.g. the genre does not exist) the whole
/// transaction rolls back and the book is not persisted.
pub async fn create_book(
    db: &DatabaseConnection,
    input: CreateBookInput,
) -> Result<i32, ServiceError> {
    let txn = db.begin().await?;

    let new_book = BookActiveModel {
        title: Set(input.title),
        author: Set(input.author),
        published_at: Set(input.published_at),
        info: Set(input.info),
        summary: Set(input.summary),
        ..Default::default()
    };
    let model = new_book.insert(&txn).await?;

    if let Some(genre_ids) = input.genres_id {
        for genre_id in genre_ids {
            let link = BookGenreActiveModel {
                book_id: Set(model.id),
                genre_id: Set(genre_id),
            };
            BookGenreEntity::insert(link)
                .exec_without_returning(&txn)
                .await?;
        }
    }

    txn.commit().await?;
    Ok(model.id)
}

/// Partially update a book; only supplied fields change.
pub async fn update_book(
    db: &DatabaseConnection,
    id: i32,
    input: UpdateBookInput,
) -> Result<Book, ServiceError> {
    let txn = db.begin().await?;

    let model = BookEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(ServiceError::NotFound)?;

    let has_field_changes = input.title.is_some()
        || input.author.is_some()
        || input.published_at.is_some()
        || input.info.is_some()
        || input.summary.is_some();

    let model = if has_field_changes {
        let mut book: BookActiveModel = model.into();
        if let Some(title) = input.title {
            book.title = Set(title);
        }
        if let Some(author) = input.author {
            book.author = Set(author);
        }
        if let Some(published_at) = input.published_at {
            book.published_at = Set(published_at);
        }
        if let Some(info) = input.info {
            book.info = Set(Some(info));
        }
        if let Some(summary) = input.summary {
            book.summary = Set(Some(summary));
        }
        book.update(&txn).await?
    } else {
        model
    };

    // Presence of genresId, even as an empty list, replaces the whole set.
    if let Some(genre_ids) = input.genres_id {
        BookGenreEntity::delete_many()
            .filter(BookGenreColumn::BookId.eq(id))
            .exec(&txn)
            .await?;

        for genre_id in genre_ids {
            let link = BookGenreActiveModel {
                book_id: Set(id),
                genre_id: Set(genre_id),
            };
            BookGenreEntity::insert(link)
                .exec_without_returning(&txn)
                .await?;
        }
    }

    txn.commit().await?;
    Ok(Book::from(model))
}

/// Delete a book and its genre associations, returning the deleted row.
pub async fn delete_book(db: &DatabaseConnection, id: i32) -> Result<Book, ServiceError> {
    let txn = db.begin().await?;

    let model = BookEntity::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(ServiceError::NotFound)?;

    BookGenreEntity::delete_many()
        .filter(BookGenreColumn::BookId.eq(id))
        .exec(&txn)
        .await?;

    let book = Book::from(model.clone());
    model.delete(&txn).await?;

    txn.commit().await?;
    Ok(book)
}
