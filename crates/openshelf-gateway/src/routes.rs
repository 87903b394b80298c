use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use openshelf_common::Error;
use serde_json::json;
use tracing::info;

use crate::schema::{BookResponse, DataResponse, EditBook, NewBook, SuccessResponse};
use crate::state::SharedState;

/// Maps store failures onto HTTP responses.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(e: Error) -> Self {
        Self(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self.0 {
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };
        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

pub async fn list_books(
    State(state): State<SharedState>,
) -> Result<Json<DataResponse<BookResponse>>, ApiError> {
    let books = state.store.list_books()?;
    Ok(Json(DataResponse {
        data: books.into_iter().map(BookResponse::from).collect(),
    }))
}

pub async fn create_book(
    State(state): State<SharedState>,
    Json(new_book): Json<NewBook>,
) -> Result<(StatusCode, Json<BookResponse>), ApiError> {
    let book = state
        .store
        .create_book(&new_book.title, &new_book.description)?;
    info!("created book {}", book.id);
    Ok((StatusCode::CREATED, Json(book.into())))
}

pub async fn update_book(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    Json(edit): Json<EditBook>,
) -> Result<Json<BookResponse>, ApiError> {
    let book = state
        .store
        .update_book(&id, &edit.title, &edit.description)?
        .ok_or_else(|| Error::NotFound("Book not found".into()))?;
    Ok(Json(book.into()))
}

pub async fn delete_book(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>, ApiError> {
    if !state.store.soft_delete_book(&id)? {
        return Err(Error::NotFound("Book not found".into()).into());
    }
    info!("soft-deleted book {id}");
    Ok(Json(SuccessResponse { success: true }))
}
