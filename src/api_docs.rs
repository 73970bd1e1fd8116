use crate::api;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        api::books::list_books,
        api::books::get_book,
        api::books::create_book,
        api::books::update_book,
        api::books::delete_book,
        api::genres::list_genres,
        api::genres::create_genre,
        api::genres::get_genre,
        api::genres::delete_genre,
        api::book_genres::list_links,
        api::book_genres::create_link,
        api::book_genres::delete_link,
    ),
    tags(
        (name = "bookstore", description = "Book Store API")
    )
)]
pub struct ApiDoc;
