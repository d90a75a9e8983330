//! HTTP handlers for `/books`.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use bookshelf_http::{error::AppError, response::ApiResponse};

use super::models::{BookDetail, BookFilter, BookList, BookPayload, CreatedBook, ListQuery};
use super::store::BookStore;

/// Routes served by the books module, bound to `store`.
pub fn router(store: Arc<BookStore>) -> Router {
    Router::new()
        .route("/books", get(list_books).post(create_book))
        .route(
            "/books/{id}",
            get(get_book).put(update_book).delete(delete_book),
        )
        .with_state(store)
}

fn malformed_body(rejection: JsonRejection) -> AppError {
    AppError::bad_request(format!("Payload tidak valid: {}", rejection.body_text()))
}

async fn create_book(
    State(store): State<Arc<BookStore>>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<CreatedBook>, AppError> {
    let Json(payload) = payload.map_err(malformed_body)?;
    let book_id = store.create(payload).await?;

    Ok(ApiResponse::created(
        "Buku berhasil ditambahkan",
        CreatedBook { book_id },
    ))
}

/// Listing never fails: an unreadable query string lists without filters.
async fn list_books(
    State(store): State<Arc<BookStore>>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> ApiResponse<BookList> {
    let pairs = match query {
        Ok(Query(pairs)) => pairs,
        Err(rejection) => {
            tracing::warn!(error = %rejection.body_text(), "ignoring unreadable list query");
            Vec::new()
        }
    };
    let filter = BookFilter::from(ListQuery::from_pairs(pairs));
    tracing::debug!(?filter, "listing books");

    let books = store.list(&filter).await;
    ApiResponse::ok(BookList { books })
}

async fn get_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<BookDetail>, AppError> {
    let book = store.get(&id).await?;
    Ok(ApiResponse::ok(BookDetail { book }))
}

async fn update_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
    payload: Result<Json<BookPayload>, JsonRejection>,
) -> Result<ApiResponse<()>, AppError> {
    let Json(payload) = payload.map_err(malformed_body)?;
    store.update(&id, payload).await?;
    Ok(ApiResponse::message("Buku berhasil diperbarui"))
}

async fn delete_book(
    State(store): State<Arc<BookStore>>,
    Path(id): Path<String>,
) -> Result<ApiResponse<()>, AppError> {
    store.delete(&id).await?;
    Ok(ApiResponse::message("Buku berhasil dihapus"))
}
