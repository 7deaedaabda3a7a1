//! API integration tests
//!
//! These talk to a running server backed by a real database:
//! start it with `cargo run`, then `cargo test -- --ignored`.

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:3000";

async fn create_author(client: &Client, name: &str) -> Value {
    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "name": name,
            "birthdate": "1815-12-10",
            "nationality": "British"
        }))
        .send()
        .await
        .expect("Failed to send request");

    assert_eq!(response.status(), StatusCode::CREATED);
    response.json().await.expect("Failed to parse response")
}

async fn create_book(client: &Client, author_id: &str, isbn: &str) -> reqwest::Response {
    client
        .post(format!("{}/books", BASE_URL))
        .json(&json!({
            "title": "Notes on the Engine",
            "author": author_id,
            "publishedYear": 1843,
            "genre": "Nonfiction",
            "isbn": isbn
        }))
        .send()
        .await
        .expect("Failed to send request")
}

async fn get(client: &Client, path: &str) -> (StatusCode, Value) {
    let response = client
        .get(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn delete(client: &Client, path: &str) -> StatusCode {
    client
        .delete(format!("{}{}", BASE_URL, path))
        .send()
        .await
        .expect("Failed to send request")
        .status()
}

fn unique_isbn() -> String {
    format!("ISBN-{}", Uuid::new_v4())
}

#[tokio::test]
#[ignore] // Run with: cargo test -- --ignored
async fn test_health_check() {
    let client = Client::new();
    let (status, body) = get(&client, "/health").await;

    assert!(status.is_success());
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
#[ignore]
async fn test_author_round_trip_starts_without_books() {
    let client = Client::new();
    let created = create_author(&client, "Ada Lovelace").await;
    let id = created["id"].as_str().expect("No author ID");

    let (status, body) = get(&client, &format!("/authors/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Ada Lovelace");
    assert_eq!(body["birthdate"], "1815-12-10");
    assert_eq!(body["nationality"], "British");
    assert_eq!(body["books"], json!([]));

    assert_eq!(delete(&client, &format!("/authors/{}", id)).await, StatusCode::OK);
}

#[tokio::test]
#[ignore]
async fn test_library_scenario() {
    let client = Client::new();

    let author = create_author(&client, "Ada Lovelace").await;
    let author_id = author["id"].as_str().expect("No author ID").to_string();
    assert_eq!(author["books"], json!([]));

    let response = create_book(&client, &author_id, &unique_isbn()).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let book: Value = response.json().await.expect("Failed to parse response");
    let book_id = book["id"].as_str().expect("No book ID").to_string();
    assert_eq!(book["author"], author_id.as_str());

    let (_, author) = get(&client, &format!("/authors/{}", author_id)).await;
    assert_eq!(author["books"][0]["id"], book_id.as_str());

    let (_, book) = get(&client, &format!("/books/{}", book_id)).await;
    assert_eq!(book["author"]["id"], author_id.as_str());
    assert_eq!(book["author"]["books"], json!([book_id]));

    assert_eq!(delete(&client, &format!("/authors/{}", author_id)).await, StatusCode::OK);

    let (status, body) = get(&client, &format!("/books/{}", book_id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body["error"].is_string());
}

#[tokio::test]
#[ignore]
async fn test_duplicate_isbn_is_rejected() {
    let client = Client::new();
    let author = create_author(&client, "Duplicate Checker").await;
    let author_id = author["id"].as_str().expect("No author ID").to_string();
    let isbn = unique_isbn();

    assert_eq!(create_book(&client, &author_id, &isbn).await.status(), StatusCode::CREATED);

    let response = create_book(&client, &author_id, &isbn).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());

    let (_, author) = get(&client, &format!("/authors/{}", author_id)).await;
    assert_eq!(author["books"].as_array().map(Vec::len), Some(1));

    delete(&client, &format!("/authors/{}", author_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_deleting_book_updates_author() {
    let client = Client::new();
    let author = create_author(&client, "Book Remover").await;
    let author_id = author["id"].as_str().expect("No author ID").to_string();

    let book: Value = create_book(&client, &author_id, &unique_isbn())
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let book_id = book["id"].as_str().expect("No book ID");

    let response = client
        .delete(format!("{}/books/{}", BASE_URL, book_id))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["message"].is_string());

    let (status, author) = get(&client, &format!("/authors/{}", author_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(author["books"], json!([]));

    // Deleting again is still a success
    assert_eq!(delete(&client, &format!("/books/{}", book_id)).await, StatusCode::OK);

    delete(&client, &format!("/authors/{}", author_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_pagination_bounds() {
    let client = Client::new();

    let (status, body) = get(&client, "/authors?page=1&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_array().expect("Expected an array").len() <= 10);

    let (status, body) = get(&client, "/books?page=100000&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
#[ignore]
async fn test_unknown_author_is_not_found() {
    let client = Client::new();
    let (status, body) = get(&client, &format!("/authors/{}", Uuid::new_v4())).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Author not found");
}

async fn put(client: &Client, path: &str, body: Value) -> (StatusCode, Value) {
    let response = client
        .put(format!("{}{}", BASE_URL, path))
        .json(&body)
        .send()
        .await
        .expect("Failed to send request");
    let status = response.status();
    let body = response.json().await.unwrap_or(Value::Null);
    (status, body)
}

async fn search(client: &Client, resource: &str, term: &str) -> Vec<Value> {
    let response = client
        .get(format!("{}/{}", BASE_URL, resource))
        .query(&[("search", term), ("limit", "100")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.expect("Failed to parse response");
    body.as_array().cloned().expect("Expected an array")
}

#[tokio::test]
#[ignore]
async fn test_update_author_keeps_other_fields() {
    let client = Client::new();
    let author = create_author(&client, "Partial Update").await;
    let id = author["id"].as_str().expect("No author ID").to_string();

    let (status, updated) = put(
        &client,
        &format!("/authors/{}", id),
        json!({ "nationality": "English" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["nationality"], "English");

    let (_, stored) = get(&client, &format!("/authors/{}", id)).await;
    assert_eq!(stored["name"], "Partial Update");
    assert_eq!(stored["birthdate"], "1815-12-10");
    assert_eq!(stored["nationality"], "English");

    delete(&client, &format!("/authors/{}", id)).await;
}

#[tokio::test]
#[ignore]
async fn test_update_book_keeps_other_fields() {
    let client = Client::new();
    let author = create_author(&client, "Book Updater").await;
    let author_id = author["id"].as_str().expect("No author ID").to_string();
    let isbn = unique_isbn();

    let book: Value = create_book(&client, &author_id, &isbn)
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let book_id = book["id"].as_str().expect("No book ID");

    let (status, _) = put(&client, &format!("/books/{}", book_id), json!({ "genre": "Science" })).await;
    assert_eq!(status, StatusCode::OK);

    let (_, stored) = get(&client, &format!("/books/{}", book_id)).await;
    assert_eq!(stored["genre"], "Science");
    assert_eq!(stored["title"], "Notes on the Engine");
    assert_eq!(stored["publishedYear"], 1843);
    assert_eq!(stored["isbn"], isbn.as_str());
    assert_eq!(stored["author"]["id"], author_id.as_str());

    delete(&client, &format!("/authors/{}", author_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_search_is_case_insensitive_and_literal() {
    let client = Client::new();
    let token = Uuid::new_v4().simple().to_string();
    let author = create_author(&client, &format!("Searchable {} Writer", token.to_uppercase())).await;
    let id = author["id"].as_str().expect("No author ID").to_string();

    let hits = search(&client, "authors", &token.to_lowercase()).await;
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], id.as_str());

    // Wildcards in the term only match themselves
    assert!(search(&client, "authors", &format!("{}%writer", token)).await.is_empty());
    assert!(search(&client, "authors", &format!("Searchable_{}", token)).await.is_empty());

    delete(&client, &format!("/authors/{}", id)).await;
}

#[tokio::test]
#[ignore]
async fn test_moving_book_updates_both_authors() {
    let client = Client::new();
    let first = create_author(&client, "First Owner").await;
    let second = create_author(&client, "Second Owner").await;
    let first_id = first["id"].as_str().expect("No author ID").to_string();
    let second_id = second["id"].as_str().expect("No author ID").to_string();

    let book: Value = create_book(&client, &first_id, &unique_isbn())
        .await
        .json()
        .await
        .expect("Failed to parse response");
    let book_id = book["id"].as_str().expect("No book ID").to_string();

    let (status, moved) = put(
        &client,
        &format!("/books/{}", book_id),
        json!({ "author": second_id }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(moved["author"], second_id.as_str());

    let (_, first) = get(&client, &format!("/authors/{}", first_id)).await;
    assert_eq!(first["books"], json!([]));
    let (_, second) = get(&client, &format!("/authors/{}", second_id)).await;
    assert_eq!(second["books"][0]["id"], book_id.as_str());

    delete(&client, &format!("/authors/{}", first_id)).await;
    delete(&client, &format!("/authors/{}", second_id)).await;
}

#[tokio::test]
#[ignore]
async fn test_nul_in_text_is_a_client_error() {
    let client = Client::new();

    let response = client
        .post(format!("{}/authors", BASE_URL))
        .json(&json!({
            "name": "Bad\u{0}Name",
            "birthdate": "1815-12-10",
            "nationality": "British"
        }))
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: Value = response.json().await.expect("Failed to parse response");
    assert!(body["error"].is_string());

    let response = client
        .get(format!("{}/authors", BASE_URL))
        .query(&[("search", "a\u{0}b")])
        .send()
        .await
        .expect("Failed to send request");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore]
async fn test_author_delete_succeeds_while_books_are_added() {
    let client = Client::new();
    let author = create_author(&client, "Busy Author").await;
    let author_id = author["id"].as_str().expect("No author ID").to_string();

    let writers: Vec<_> = (0..8)
        .map(|_| {
            let client = client.clone();
            let author_id = author_id.clone();
            tokio::spawn(async move { create_book(&client, &author_id, &unique_isbn()).await })
        })
        .collect();

    assert_eq!(delete(&client, &format!("/authors/{}", author_id)).await, StatusCode::OK);

    for writer in writers {
        let status = writer.await.expect("Writer panicked").status();
        assert!(status == StatusCode::CREATED || status == StatusCode::BAD_REQUEST);
    }

    // Books that landed after the delete are cleared too
    delete(&client, &format!("/authors/{}", author_id)).await;
    let (_, author) = get(&client, &format!("/authors/{}", author_id)).await;
    assert!(author["error"].is_string());
}
