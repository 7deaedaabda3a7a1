//! Author endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    error::AppResult,
    models::{Author, AuthorWithBooks, CreateAuthor, ListQuery, UpdateAuthor},
    AppState,
};

use super::{lookup_id, write_id, AppJson, AppQuery, MessageResponse};

const NOT_FOUND: &str = "Author not found";

/// List authors with search and pagination
#[utoipa::path(
    get,
    path = "/authors",
    tag = "authors",
    params(ListQuery),
    responses(
        (status = 200, description = "One page of authors", body = Vec<Author>,
            headers(("x-total-count" = i64, description = "Number of authors matching the search"))),
        (status = 400, description = "Malformed query", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_authors(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<ListQuery>,
) -> AppResult<impl IntoResponse> {
    let (authors, total) = state.services.authors.list(&query).await?;
    Ok(([("x-total-count", total.to_string())], Json(authors)))
}

/// Get an author with its books expanded
#[utoipa::path(
    get,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author details", body = AuthorWithBooks),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<AuthorWithBooks>> {
    let id = lookup_id(&id, NOT_FOUND)?;
    let author = state.services.authors.get(id).await?;
    Ok(Json(author))
}

/// Create a new author
#[utoipa::path(
    post,
    path = "/authors",
    tag = "authors",
    request_body = CreateAuthor,
    responses(
        (status = 201, description = "Author created", body = Author),
        (status = 400, description = "Missing or malformed field", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_author(
    State(state): State<AppState>,
    AppJson(data): AppJson<CreateAuthor>,
) -> AppResult<(StatusCode, Json<Author>)> {
    let author = state.services.authors.create(&data).await?;
    Ok((StatusCode::CREATED, Json(author)))
}

/// Update an author; only supplied fields change
#[utoipa::path(
    put,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    request_body = UpdateAuthor,
    responses(
        (status = 200, description = "Author updated", body = Author),
        (status = 400, description = "Malformed field or id", body = crate::error::ErrorResponse),
        (status = 404, description = "Author not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
    AppJson(data): AppJson<UpdateAuthor>,
) -> AppResult<Json<Author>> {
    let id = write_id(&id)?;
    let author = state.services.authors.update(id, &data).await?;
    Ok(Json(author))
}

/// Delete an author and all of its books
#[utoipa::path(
    delete,
    path = "/authors/{id}",
    tag = "authors",
    params(("id" = String, Path, description = "Author ID")),
    responses(
        (status = 200, description = "Author and books deleted (also when the author did not exist)", body = MessageResponse),
        (status = 400, description = "Malformed id", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_author(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MessageResponse>> {
    let id = write_id(&id)?;
    state.services.authors.delete(id).await?;
    Ok(Json(MessageResponse::new("Author and books deleted")))
}
