pub mod book_genres;
pub mod books;
pub mod genres;
pub mod health;

use axum::{
    routing::{delete, get},
    Router,
};
use sea_orm::DatabaseConnection;

pub fn api_router(db: DatabaseConnection) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health::health_check))
        // Books
        .route("/books", get(books::list_books).post(books::create_book))
        .route(
            "/books/:id",
            get(books::get_book)
                .patch(books::update_book)
                .delete(books::delete_book),
        )
        // Genres
        .route(
            "/genres",
            get(genres::list_genres).post(genres::create_genre),
        )
        .route(
            "/genres/:id",
            get(genres::get_genre).delete(genres::delete_genre),
        )
        // Book-genre links
        .route(
            "/bookgenres",
            get(book_genres::list_links).post(book_genres::create_link),
        )
        .route(
            "/bookgenres/:book_id/:genre_id",
            delete(book_genres::delete_link),
        )
        .with_state(db)
}
