use chrono::{DateTime, Utc};

use super::{book::Book, student::StudentRef};

// 名簿に見つからなかった生徒の表示名
pub const UNKNOWN_STUDENT: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub subject: String,
    pub body: String,
}

impl Notification {
    pub fn book_lent(book: &Book, holder: StudentRef, student_name: Option<&str>) -> Self {
        let student_name = student_name.unwrap_or(UNKNOWN_STUDENT);
        let due = book
            .expected_return
            .map(format_date)
            .unwrap_or_else(|| "-".into());
        Self {
            subject: format!("Book lent: {} ({})", book.title, book.code),
            body: format!(
                "The book \"{}\" (code {}) was lent to {} ({}).\nExpected return: {}.",
                book.title, book.code, student_name, holder, due
            ),
        }
    }

    pub fn book_returned(book: &Book, previous_holder: StudentRef) -> Self {
        Self {
            subject: format!("Book returned: {} ({})", book.title, book.code),
            body: format!(
                "The book \"{}\" (code {}) held by {} was returned.",
                book.title, book.code, previous_holder
            ),
        }
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}
