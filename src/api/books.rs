//! Book endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    models::{Book, BookWithAuthor, CreateBook, ListQuery, UpdateBook},
    AppState,
};

use super::{lookup_id, write_id, AppJson, AppQuery, MessageResponse};

const NOT_FOUND: &str = "Book not found";

/// List books with search and pagination, authors expanded
#[utoipa::path(
    get,
    path = "/books",
    tag = "books",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of books", body = Vec<BookWithAuthor>,
            headers(("x-total-count" = i64, description = "Number of books matching the search"))),
        (status = 400, description = "Malformed query", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_books(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let (books, total) = state.services.books.list(&query).await?;
    Ok(([("x-total-count", total.to_string())], Json(books)))
}

/// Get a book with its author expanded
#[utoipa::path(
    get,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book details", body = BookWithAuthor),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<BookWithAuthor>> {
    let id = lookup_id(&id, NOT_FOUND)?;
    let book = state.services.books.get(id).await?;
    Ok(Json(book))
}

/// Create a new book
#[utoipa::path(
    post,
    path = "/books",
    tag = "books",
    request_body = CreateBook,
    responses(
        (status = 201, description = "Book created", body = Book),
        (status = 400, description = "Missing field, duplicate ISBN or unknown author", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_book(
    State(state): State<AppState>,
    AppJson(data): AppJson<CreateBook>,
) -> AppResult<(StatusCode, Json<Book>)> {
    let book = state.services.books.create(&data).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

/// Update a book; only supplied fields change
#[utoipa::path(
    put,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    request_body = UpdateBook,
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 400, description = "Malformed field or id, duplicate ISBN", body = crate::error::ErrorResponse),
        (status = 404, description = "Book not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(data): AppJson<UpdateBook>,
) -> AppResult<Json<Book>> {
    let id = write_id(&id)?;
    let book = state.services.books.update(id, &data).await?;
    Ok(Json(book))
}

/// Delete a book
#[utoipa::path(
    delete,
    path = "/books/{id}",
    tag = "books",
    params(("id" = String, Path, description = "Book ID")),
    responses(
        (status = 200, description = "Book deleted (also when it did not exist)", body = MessageResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = write_id(&id)?;
    state.services.books.delete(id).await?;
    Ok(Json(MessageResponse::new("Book deleted")))
}
