use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        book::{
            event::{CreateBook, DeleteBook, DeleteBooksByStatus, UpdateBook},
            lending::{LoanState, UpdatedBook},
            Book,
        },
        id::BookId,
    },
    repository::book::BookRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{
    model::book::{BookRow, LoanRow, BOOK_COLUMNS},
    ConnectionPool,
};

#[derive(new)]
pub struct BookRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookRepository for BookRepositoryImpl {
    async fn create(&self, event: CreateBook) -> AppResult<Book> {
        let code = event.code;
        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
                INSERT INTO books (code, title, author, genre, editor, location, reference, status)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
                RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(event.code)
        .bind(event.title)
        .bind(event.author)
        .bind(event.genre)
        .bind(event.editor)
        .bind(event.location)
        .bind(event.reference)
        .bind(event.status.as_ref())
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| map_write_error(e, code))?;

        row.try_into()
    }

    async fn find_all(&self) -> AppResult<Vec<Book>> {
        let rows = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books ORDER BY code ASC"
        ))
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        rows.into_iter().map(Book::try_from).collect()
    }

    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>> {
        let row = sqlx::query_as::<_, BookRow>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE book_id = $1"
        ))
        .bind(book_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.map(Book::try_from).transpose()
    }

    async fn update(&self, event: UpdateBook) -> AppResult<UpdatedBook> {
        let code = event.code;
        let book_id = event.book_id;
        let mut tx = self.db.begin().await?;

        // 更新前の貸出状態を行ロック付きで読む
        let previous: LoanState = sqlx::query_as::<_, LoanRow>(
            "SELECT currently_with, expected_return FROM books WHERE book_id = $1 FOR UPDATE",
        )
        .bind(book_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or_else(|| not_found(book_id))?
        .try_into()?;

        let next = previous.apply(&event.loan)?;

        let row = sqlx::query_as::<_, BookRow>(&format!(
            r#"
                UPDATE books
                SET code = $1, title = $2, author = $3, genre = $4, editor = $5,
                    location = $6, reference = $7, status = $8,
                    currently_with = $9, expected_return = $10
                WHERE book_id = $11
                RETURNING {BOOK_COLUMNS}
            "#
        ))
        .bind(event.code)
        .bind(event.title)
        .bind(event.author)
        .bind(event.genre)
        .bind(event.editor)
        .bind(event.location)
        .bind(event.reference)
        .bind(event.status.as_ref())
        .bind(next.holder.map(|h| h.to_string()))
        .bind(next.expected_return)
        .bind(book_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error(e, code))?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(UpdatedBook {
            previous_holder: previous.holder,
            book: row.try_into()?,
        })
    }

    async fn delete(&self, event: DeleteBook) -> AppResult<()> {
        let res = sqlx::query("DELETE FROM books WHERE book_id = $1")
            .bind(event.book_id)
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(not_found(event.book_id));
        }

        Ok(())
    }

    async fn delete_by_status(&self, event: DeleteBooksByStatus) -> AppResult<u64> {
        let res = sqlx::query("DELETE FROM books WHERE status = $1")
            .bind(event.status.as_ref())
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;

        Ok(res.rows_affected())
    }
}

fn not_found(book_id: BookId) -> AppError {
    AppError::EntityNotFound(format!("book {book_id} was not found"))
}

// code の一意制約違反（PostgreSQL の 23505）だけを ConflictError に読み替える
fn map_write_error(e: sqlx::Error, code: i32) -> AppError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::ConflictError(format!("code {code} is already used by another book"))
        }
        _ => AppError::SpecificOperationError(e),
    }
}
