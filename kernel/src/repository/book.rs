use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    book::{
        event::{CreateBook, DeleteBook, DeleteBooksByStatus, UpdateBook},
        lending::UpdatedBook,
        Book,
    },
    id::BookId,
};

#[mockall::automock]
#[async_trait]
pub trait BookRepository: Send + Sync {
    // code が他の本と重複している場合は ConflictError を返す
    async fn create(&self, event: CreateBook) -> AppResult<Book>;
    async fn find_all(&self) -> AppResult<Vec<Book>>;
    async fn find_by_id(&self, book_id: BookId) -> AppResult<Option<Book>>;
    // 1 つのトランザクションで更新前の貸出先を読み、更新後の本と一緒に返す
    async fn update(&self, event: UpdateBook) -> AppResult<UpdatedBook>;
    async fn delete(&self, event: DeleteBook) -> AppResult<()>;
    // 削除した件数を返す
    async fn delete_by_status(&self, event: DeleteBooksByStatus) -> AppResult<u64>;
}
