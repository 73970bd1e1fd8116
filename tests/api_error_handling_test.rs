use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, PaginatorTrait, Set};
use serde_json::{json, Value};
use tower::util::ServiceExt; // for `oneshot`

use bookstore::{db, models, server};

async fn setup_app() -> (Router, DatabaseConnection) {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    let app = server::build_router(db.clone(), &[]);
    (app, db)
}

fn json_request(method: &str, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    serde_json::from_slice(&bytes).expect("Body is not valid JSON")
}

#[tokio::test]
async fn test_get_book_not_found() {
    let (app, _db) = setup_app().await;

    let req = Request::builder()
        .uri("/api/v1/books/999")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert_eq!(body["error"], json!("Book not found"));
}

#[tokio::test]
async fn test_update_book_not_found() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(json_request(
            "PATCH",
            "/api/v1/books/999",
            r#"{"title": "Non-existent Book"}"#,
        ))
        .await
        .unwrap();

    // Not-found is distinct from a generic store failure
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = response_json(response).await;
    assert_eq!(body["error"], json!("Book not found"));
}

#[tokio::test]
async fn test_delete_book_not_found() {
    let (app, _db) = setup_app().await;

    let req = Request::builder()
        .uri("/api/v1/books/999")
        .method("DELETE")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_book_rejects_empty_fields() {
    let (app, db) = setup_app().await;

    let payload = json!({
        "title": "",
        "author": "",
        "publishedAt": "1999-01-01",
        "info": null,
        "summary": null,
        "genresId": null
    });

    let response = app
        .oneshot(json_request("POST", "/api/v1/books", &payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], json!("Validation failed"));
    let details = body["details"].as_array().expect("details missing");
    assert!(details.iter().any(|d| d.as_str().unwrap().contains("title")));
    assert!(details
        .iter()
        .any(|d| d.as_str().unwrap().contains("author")));

    // Invalid input never reaches the store
    let count = models::book::Entity::find()
        .count(&db)
        .await
        .expect("Failed to count books");
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_create_book_rejects_malformed_date() {
    let (app, _db) = setup_app().await;

    let payload = json!({
        "title": "Dune",
        "author": "Herbert",
        "publishedAt": "not-a-date",
        "info": null,
        "summary": null,
        "genresId": null
    });

    let response = app
        .oneshot(json_request("POST", "/api/v1/books", &payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    let details = body["details"].as_array().expect("details missing");
    assert!(details
        .iter()
        .any(|d| d.as_str().unwrap().contains("publishedAt")));
}

#[tokio::test]
async fn test_create_book_rejects_overlong_field() {
    let (app, _db) = setup_app().await;

    let payload = json!({
        "title": "T".repeat(256),
        "author": "Herbert",
        "publishedAt": "1965-08-01",
        "info": null,
        "summary": null,
        "genresId": null
    });

    let response = app
        .oneshot(json_request("POST", "/api/v1/books", &payload.to_string()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    let details = body["details"].as_array().expect("details missing");
    assert!(details
        .iter()
        .any(|d| d.as_str().unwrap().contains("255 characters")));
}

#[tokio::test]
async fn test_create_book_missing_required_field() {
    let (app, _db) = setup_app().await;

    // No title at all: rejected by deserialization before validation
    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/books",
            r#"{"author": "Herbert", "publishedAt": "1965-08-01"}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_book_malformed_json() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/v1/books", "{not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_book_rejects_invalid_fields() {
    let (app, db) = setup_app().await;

    let book = models::book::ActiveModel {
        title: Set("Valid".to_string()),
        author: Set("Author".to_string()),
        published_at: Set("2000-01-01".to_string()),
        ..Default::default()
    };
    let model = book.insert(&db).await.expect("Failed to create book");

    let response = app
        .oneshot(json_request(
            "PATCH",
            &format!("/api/v1/books/{}", model.id),
            r#"{"title": ""}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // Row unchanged
    let unchanged = models::book::Entity::find_by_id(model.id)
        .one(&db)
        .await
        .expect("Failed to query book")
        .expect("Book disappeared");
    assert_eq!(unchanged.title, "Valid");
}

#[tokio::test]
async fn test_create_genre_rejects_empty_title() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(json_request("POST", "/api/v1/genres", r#"{"title": ""}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = response_json(response).await;
    assert_eq!(body["error"], json!("Validation failed"));
}

#[tokio::test]
async fn test_get_genre_not_found() {
    let (app, _db) = setup_app().await;

    let req = Request::builder()
        .uri("/api/v1/genres/42")
        .method("GET")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_link_with_missing_book_fails_opaquely() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/v1/bookgenres",
            r#"{"bookId": 1, "genreId": 1}"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = response_json(response).await;
    // Opaque message, no raw store error leaked
    assert_eq!(body["error"], json!("Failed to link book and genre"));
}
