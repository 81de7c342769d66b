use std::sync::Arc;

use derive_new::new;
use shared::error::{AppError, AppResult};

use crate::{
    model::{
        book::{
            event::{CreateBook, DeleteBook, DeleteBooksByStatus, UpdateBook},
            lending::LoanTransition,
            search::filter_books,
            Book, BookStatus,
        },
        id::BookId,
        notification::Notification,
        role::Role,
    },
    notifier::Notifier,
    repository::{book::BookRepository, roster::RosterRepository},
};

#[derive(new)]
pub struct BookService {
    book_repository: Arc<dyn BookRepository>,
    roster_repository: Arc<dyn RosterRepository>,
    notifier: Arc<dyn Notifier>,
}

impl BookService {
    pub async fn list_books(&self, query: Option<&str>) -> AppResult<Vec<Book>> {
        let books = self.book_repository.find_all().await?;
        Ok(match query {
            Some(q) => filter_books(books, q),
            None => books,
        })
    }

    pub async fn find_book(&self, book_id: BookId) -> AppResult<Book> {
        self.book_repository
            .find_by_id(book_id)
            .await?
            .ok_or_else(|| AppError::EntityNotFound(format!("book {book_id} was not found")))
    }

    pub async fn add_book(&self, role: Role, event: CreateBook) -> AppResult<Book> {
        role.ensure_admin()?;
        let book = self.book_repository.create(event).await?;
        tracing::info!(book.id = %book.id, book.code = book.code, "book registered");
        Ok(book)
    }

    /// 本を更新し、貸出状態が変わった場合は通知を送る。
    /// 通知は更新の確定後に別タスクで送られ、その成否は戻り値に影響しない。
    pub async fn update_book(&self, role: Role, event: UpdateBook) -> AppResult<Book> {
        role.ensure_admin()?;
        event.loan.validate()?;

        let updated = self.book_repository.update(event).await?;
        let transition = updated.transition();
        tracing::info!(
            book.id = %updated.book.id,
            book.code = updated.book.code,
            book.on_shelf = updated.book.is_on_shelf(),
            ?transition,
            "book updated"
        );

        self.dispatch_notification(transition, updated.book.clone());
        Ok(updated.book)
    }

    pub async fn delete_book(&self, role: Role, event: DeleteBook) -> AppResult<()> {
        role.ensure_admin()?;
        let book_id = event.book_id;
        self.book_repository.delete(event).await?;
        tracing::info!(book.id = %book_id, "book deleted");
        Ok(())
    }

    pub async fn delete_books_by_status(
        &self,
        role: Role,
        event: DeleteBooksByStatus,
    ) -> AppResult<u64> {
        role.ensure_admin()?;
        if event.status == BookStatus::Active {
            return Err(AppError::InvalidRequest(
                "active books cannot be deleted in bulk".into(),
            ));
        }
        let status = event.status;
        let deleted = self.book_repository.delete_by_status(event).await?;
        tracing::info!(%status, deleted, "books deleted by status");
        Ok(deleted)
    }

    fn dispatch_notification(&self, transition: LoanTransition, book: Book) {
        if transition == LoanTransition::NoChange {
            return;
        }
        let roster = self.roster_repository.clone();
        let notifier = self.notifier.clone();
        tokio::spawn(async move {
            notify(roster.as_ref(), notifier.as_ref(), transition, &book).await;
        });
    }
}

async fn notify(
    roster: &dyn RosterRepository,
    notifier: &dyn Notifier,
    transition: LoanTransition,
    book: &Book,
) {
    let notification = match transition {
        LoanTransition::NoChange => return,
        LoanTransition::LoanStarted { holder } => {
            let student = roster
                .find_by_id(holder.student_id())
                .await
                .unwrap_or_else(|e| {
                    tracing::warn!(
                        error.message = %e,
                        student = %holder,
                        "roster lookup failed"
                    );
                    None
                });
            let name = student.map(|s| s.full_name());
            Notification::book_lent(book, holder, name.as_deref())
        }
        LoanTransition::LoanEnded { previous_holder } => {
            Notification::book_returned(book, previous_holder)
        }
    };

    if let Err(e) = notifier.send(notification).await {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            book.code = book.code,
            "failed to send lending notification"
        );
    }
}
