use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::services::book_service::{self, CreateBookInput, ServiceError, UpdateBookInput};

const MAX_FIELD_LEN: usize = 255;

/// Request DTO for creating a book
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateBookRequest {
    pub title: String,
    pub author: String,
    #[serde(rename = "publishedAt")]
    pub published_at: String,
    #[serde(default)]
    pub info: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default, rename = "genresId")]
    pub genres_id: Option<Vec<i32>>,
}

/// Request DTO for partially updating a book
#[derive(Debug, Default, Deserialize)]
pub struct UpdateBookRequest {
    pub title: Option<String>,
    pub author: Option<String>,
    #[serde(rename = "publishedAt")]
    pub published_at: Option<String>,
    pub info: Option<String>,
    pub summary: Option<String>,
    #[serde(rename = "genresId")]
    pub genres_id: Option<Vec<i32>>,
}

fn check_text(field: &str, value: &str, errors: &mut Vec<String>) {
    if value.is_empty() {
        errors.push(format!("{field} must not be empty"));
    } else if value.len() > MAX_FIELD_LEN {
        errors.push(format!("{field} must be at most {MAX_FIELD_LEN} characters"));
    }
}

fn check_date(field: &str, value: &str, errors: &mut Vec<String>) {
    if chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d").is_err() {
        errors.push(format!("{field} must be an ISO 8601 date (YYYY-MM-DD)"));
    }
}

impl CreateBookRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        check_text("title", &self.title, &mut errors);
        check_text("author", &self.author, &mut errors);
        check_date("publishedAt", &self.published_at, &mut errors);
        if let Some(info) = &self.info {
            check_text("info", info, &mut errors);
        }
        if let Some(summary) = &self.summary {
            check_text("summary", summary, &mut errors);
        }
        errors
    }
}

impl UpdateBookRequest {
    fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if let Some(title) = &self.title {
            check_text("title", title, &mut errors);
        }
        if let Some(author) = &self.author {
            check_text("author", author, &mut errors);
        }
        if let Some(published_at) = &self.published_at {
            check_date("publishedAt", published_at, &mut errors);
        }
        if let Some(info) = &self.info {
            check_text("info", info, &mut errors);
        }
        if let Some(summary) = &self.summary {
            check_text("summary", summary, &mut errors);
        }
        errors
    }
}

fn validation_failed(errors: Vec<String>) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "Validation failed", "details": errors })),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/v1/books",
    responses(
        (status = 200, description = "All books with their genre ids")
    )
)]
pub async fn list_books(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match book_service::list_books(&db).await {
        Ok(books) => (StatusCode::OK, Json(books)).into_response(),
        Err(e) => {
            tracing::error!("Error fetching books: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch books" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "The book with its genre ids and titles"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn get_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::get_book(&db, id).await {
        Ok(Some(book)) => (StatusCode::OK, Json(book)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Book not found" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error fetching book {}: {:?}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch book" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/books",
    responses(
        (status = 201, description = "Book created with its genre links"),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_book(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateBookRequest>,
) -> impl IntoResponse {
    let errors = payload.validate();
    if !errors.is_empty() {
        return validation_failed(errors);
    }

    let input = CreateBookInput {
        title: payload.title.clone(),
        author: payload.author.clone(),
        published_at: payload.published_at.clone(),
        info: payload.info.clone(),
        summary: payload.summary.clone(),
        genres_id: payload.genres_id.clone(),
    };

    match book_service::create_book(&db, input).await {
        Ok(book_id) => (
            StatusCode::CREATED,
            Json(json!({ "success": true, "book": payload, "bookid": book_id })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error adding book: {:?}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to add book" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    patch,
    path = "/api/v1/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book updated"),
        (status = 400, description = "Validation failed"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn update_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
    Json(payload): Json<UpdateBookRequest>,
) -> impl IntoResponse {
    let errors = payload.validate();
    if !errors.is_empty() {
        return validation_failed(errors);
    }

    let input = UpdateBookInput {
        title: payload.title,
        author: payload.author,
        published_at: payload.published_at,
        info: payload.info,
        summary: payload.summary,
        genres_id: payload.genres_id,
    };

    match book_service::update_book(&db, id, input).await {
        Ok(book) => (
            StatusCode::OK,
            Json(json!({ "success": true, "book": book })),
        )
            .into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Book not found" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error updating book {}: {:?}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to update book" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/books/{id}",
    params(("id" = i32, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted, prior field values returned"),
        (status = 404, description = "Book not found")
    )
)]
pub async fn delete_book(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match book_service::delete_book(&db, id).await {
        Ok(book) => (
            StatusCode::OK,
            Json(json!({ "success": true, "book": book })),
        )
            .into_response(),
        Err(ServiceError::NotFound) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Book not found" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error deleting book {}: {:?}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to delete book" })),
            )
                .into_response()
        }
    }
}
