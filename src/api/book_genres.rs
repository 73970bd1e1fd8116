use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use serde::Deserialize;
use serde_json::json;

use crate::models::book_genres::{
    ActiveModel as BookGenreActiveModel, Column as BookGenreColumn, Entity as BookGenre,
};

#[derive(Debug, Deserialize)]
pub struct LinkRequest {
    #[serde(rename = "bookId")]
    book_id: i32,
    #[serde(rename = "genreId")]
    genre_id: i32,
}

#[utoipa::path(
    get,
    path = "/api/v1/bookgenres",
    responses(
        (status = 200, description = "All book-genre association rows")
    )
)]
pub async fn list_links(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match BookGenre::find().all(&db).await {
        Ok(links) => (StatusCode::OK, Json(links)).into_response(),
        Err(e) => {
            tracing::error!("Error fetching book-genre links: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch book-genre links" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/bookgenres",
    responses(
        (status = 201, description = "Book linked to genre"),
        (status = 500, description = "Link failed (missing book/genre or duplicate pair)")
    )
)]
pub async fn create_link(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<LinkRequest>,
) -> impl IntoResponse {
    let link = BookGenreActiveModel {
        book_id: Set(payload.book_id),
        genre_id: Set(payload.genre_id),
    };

    match BookGenre::insert(link).exec_without_returning(&db).await {
        Ok(_) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "bookId": payload.book_id,
                "genreId": payload.genre_id
            })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!(
                "Error linking book {} to genre {}: {}",
                payload.book_id,
                payload.genre_id,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to link book and genre" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/bookgenres/{book_id}/{genre_id}",
    params(
        ("book_id" = i32, Path, description = "Book id"),
        ("genre_id" = i32, Path, description = "Genre id")
    ),
    responses(
        (status = 200, description = "Link removed"),
        (status = 404, description = "Link not found")
    )
)]
pub async fn delete_link(
    State(db): State<DatabaseConnection>,
    Path((book_id, genre_id)): Path<(i32, i32)>,
) -> impl IntoResponse {
    let result = BookGenre::delete_many()
        .filter(BookGenreColumn::BookId.eq(book_id))
        .filter(BookGenreColumn::GenreId.eq(genre_id))
        .exec(&db)
        .await;

    match result {
        Ok(res) if res.rows_affected == 0 => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Link not found" })),
        )
            .into_response(),
        Ok(_) => (StatusCode::OK, Json(json!({ "success": true }))).into_response(),
        Err(e) => {
            tracing::error!(
                "Error unlinking book {} from genre {}: {}",
                book_id,
                genre_id,
                e
            );
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to unlink book and genre" })),
            )
                .into_response()
        }
    }
}
