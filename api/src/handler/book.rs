use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::{
    book::event::{DeleteBook, DeleteBooksByStatus, UpdateBook},
    id::BookId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::{
    extractor::AuthorizedUser,
    model::book::{
        BookListQuery, BookResponse, CreateBookRequest, DeleteBooksQuery, DeletedBooksResponse,
        UpdateBookRequest, UpdateBookRequestWithId,
    },
};

// 本文の解釈は権限の確認後に行うため、JSON の不備も 400 として返す
fn invalid_body(rejection: JsonRejection) -> AppError {
    AppError::InvalidRequest(rejection.body_text())
}

#[tracing::instrument(skip(user, registry), fields(user = %user.identity))]
pub async fn show_book_list(
    user: AuthorizedUser,
    Query(query): Query<BookListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<BookResponse>>> {
    registry
        .book_service()
        .list_books(query.q.as_deref())
        .await
        .map(|books| Json(books.into_iter().map(BookResponse::from).collect()))
}

#[tracing::instrument(skip(user, registry), fields(user = %user.identity))]
pub async fn show_book(
    user: AuthorizedUser,
    Path(book_id): Path<BookId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookResponse>> {
    registry
        .book_service()
        .find_book(book_id)
        .await
        .map(BookResponse::from)
        .map(Json)
}

#[tracing::instrument(skip(user, registry, payload), fields(user = %user.identity))]
pub async fn register_book(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    payload: Result<Json<CreateBookRequest>, JsonRejection>,
) -> AppResult<(StatusCode, Json<BookResponse>)> {
    user.ensure_admin()?;
    let Json(req) = payload.map_err(invalid_body)?;
    req.validate(&())?;

    registry
        .book_service()
        .add_book(user.role, req.into())
        .await
        .map(|book| (StatusCode::CREATED, Json(book.into())))
}

#[tracing::instrument(skip(user, registry, payload), fields(user = %user.identity))]
pub async fn update_book(
    user: AuthorizedUser,
    Path(book_id): Path<BookId>,
    State(registry): State<AppRegistry>,
    payload: Result<Json<UpdateBookRequest>, JsonRejection>,
) -> AppResult<Json<BookResponse>> {
    user.ensure_admin()?;
    let Json(req) = payload.map_err(invalid_body)?;
    req.validate(&())?;

    let event = UpdateBook::try_from(UpdateBookRequestWithId(book_id, req))?;
    registry
        .book_service()
        .update_book(user.role, event)
        .await
        .map(BookResponse::from)
        .map(Json)
}

#[tracing::instrument(skip(user, registry), fields(user = %user.identity))]
pub async fn delete_book(
    user: AuthorizedUser,
    Path(book_id): Path<BookId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .book_service()
        .delete_book(user.role, DeleteBook::new(book_id))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip(user, registry), fields(user = %user.identity))]
pub async fn delete_books_by_status(
    user: AuthorizedUser,
    Query(query): Query<DeleteBooksQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<DeletedBooksResponse>> {
    registry
        .book_service()
        .delete_books_by_status(user.role, DeleteBooksByStatus::new(query.status))
        .await
        .map(|deleted| Json(DeletedBooksResponse { deleted }))
}
