use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, ModelTrait, Set};
use serde::Deserialize;
use serde_json::json;

use crate::models::genre::{ActiveModel as GenreActiveModel, Entity as Genre};

#[derive(Debug, Deserialize)]
pub struct CreateGenreRequest {
    title: String,
}

#[utoipa::path(
    get,
    path = "/api/v1/genres",
    responses(
        (status = 200, description = "All genres")
    )
)]
pub async fn list_genres(State(db): State<DatabaseConnection>) -> impl IntoResponse {
    match Genre::find().all(&db).await {
        Ok(genres) => (StatusCode::OK, Json(genres)).into_response(),
        Err(e) => {
            tracing::error!("Error fetching genres: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch genres" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    post,
    path = "/api/v1/genres",
    responses(
        (status = 201, description = "Genre created"),
        (status = 400, description = "Validation failed")
    )
)]
pub async fn create_genre(
    State(db): State<DatabaseConnection>,
    Json(payload): Json<CreateGenreRequest>,
) -> impl IntoResponse {
    if payload.title.is_empty() || payload.title.len() > 255 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "error": "Validation failed",
                "details": ["title must be between 1 and 255 characters"]
            })),
        )
            .into_response();
    }

    let genre = GenreActiveModel {
        title: Set(payload.title),
        ..Default::default()
    };

    match genre.insert(&db).await {
        Ok(model) => (StatusCode::CREATED, Json(model)).into_response(),
        Err(e) => {
            tracing::error!("Error creating genre: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to create genre" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/v1/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "The genre"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn get_genre(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    match Genre::find_by_id(id).one(&db).await {
        Ok(Some(genre)) => (StatusCode::OK, Json(genre)).into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Genre not found" })),
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Error fetching genre {}: {}", id, e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to fetch genre" })),
            )
                .into_response()
        }
    }
}

#[utoipa::path(
    delete,
    path = "/api/v1/genres/{id}",
    params(("id" = i32, Path, description = "Genre id")),
    responses(
        (status = 200, description = "Genre deleted, its book links removed by cascade"),
        (status = 404, description = "Genre not found")
    )
)]
pub async fn delete_genre(
    State(db): State<DatabaseConnection>,
    Path(id): Path<i32>,
) -> impl IntoResponse {
    let genre = match Genre::find_by_id(id).one(&db).await {
        Ok(genre) => genre,
        Err(e) => {
            tracing::error!("Error fetching genre {}: {}", id, e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to delete genre" })),
            )
                .into_response();
        }
    };

    match genre {
        Some(genre) => match genre.delete(&db).await {
            Ok(_) => (
                StatusCode::OK,
                Json(json!({ "message": "Genre deleted" })),
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Error deleting genre {}: {}", id, e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "Failed to delete genre" })),
                )
                    .into_response()
            }
        },
        None => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Genre not found" })),
        )
            .into_response(),
    }
}
