use std::str::FromStr;

use chrono::{DateTime, Utc};
use kernel::model::{
    book::{lending::LoanState, Book, BookStatus},
    id::BookId,
    student::StudentRef,
};
use shared::error::AppError;

pub const BOOK_COLUMNS: &str = "book_id, code, title, author, genre, editor, location, \
                                reference, status, currently_with, expected_return";

#[derive(sqlx::FromRow)]
pub struct BookRow {
    pub book_id: BookId,
    pub code: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub editor: String,
    pub location: String,
    pub reference: String,
    pub status: String,
    pub currently_with: Option<String>,
    pub expected_return: Option<DateTime<Utc>>,
}

impl TryFrom<BookRow> for Book {
    type Error = AppError;

    fn try_from(value: BookRow) -> Result<Self, Self::Error> {
        let BookRow {
            book_id,
            code,
            title,
            author,
            genre,
            editor,
            location,
            reference,
            status,
            currently_with,
            expected_return,
        } = value;
        Ok(Book {
            id: book_id,
            code,
            title,
            author,
            genre,
            editor,
            location,
            reference,
            status: parse_status(&status)?,
            currently_with: parse_holder(currently_with.as_deref())?,
            expected_return,
        })
    }
}

// 更新前の貸出状態を読むための行
#[derive(sqlx::FromRow)]
pub struct LoanRow {
    pub currently_with: Option<String>,
    pub expected_return: Option<DateTime<Utc>>,
}

impl TryFrom<LoanRow> for LoanState {
    type Error = AppError;

    fn try_from(value: LoanRow) -> Result<Self, Self::Error> {
        Ok(LoanState::new(
            parse_holder(value.currently_with.as_deref())?,
            value.expected_return,
        ))
    }
}

fn parse_status(raw: &str) -> Result<BookStatus, AppError> {
    BookStatus::from_str(raw)
        .map_err(|_| AppError::ConversionEntityError(format!("unknown book status: {raw}")))
}

// 空文字は貸出なしとして扱う
fn parse_holder(raw: Option<&str>) -> Result<Option<StudentRef>, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<StudentRef>().map(Some).map_err(|_| {
            AppError::ConversionEntityError(format!("invalid student reference in database: {s}"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn row(status: &str, currently_with: Option<&str>) -> BookRow {
        BookRow {
            book_id: BookId::new(),
            code: 12,
            title: "Don Segundo Sombra".into(),
            author: "Ricardo Güiraldes".into(),
            genre: "Novela".into(),
            editor: "Losada".into(),
            location: "B2".into(),
            reference: "donación".into(),
            status: status.into(),
            currently_with: currently_with.map(Into::into),
            expected_return: currently_with
                .map(|_| Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap()),
        }
    }

    #[test]
    fn converts_row_on_loan() {
        let book = Book::try_from(row("lost", Some("HF1234"))).unwrap();
        assert_eq!(book.status, BookStatus::Lost);
        assert_eq!(book.currently_with, Some(StudentRef::new(1234)));
        assert!(book.expected_return.is_some());
    }

    #[rstest]
    #[case(None)]
    #[case(Some(""))]
    fn empty_holder_is_on_shelf(#[case] holder: Option<&str>) {
        let book = Book::try_from(row("active", holder)).unwrap();
        assert!(book.is_on_shelf());
    }

    #[rstest]
    #[case("borrowed", None)]
    #[case("active", Some("someone"))]
    fn corrupt_rows_fail_conversion(#[case] status: &str, #[case] holder: Option<&str>) {
        assert!(matches!(
            Book::try_from(row(status, holder)),
            Err(AppError::ConversionEntityError(_))
        ));
    }

    #[test]
    fn loan_row_converts_to_state() {
        let state = LoanState::try_from(LoanRow {
            currently_with: Some("HF9".into()),
            expected_return: None,
        })
        .unwrap();
        assert_eq!(state.holder, Some(StudentRef::new(9)));
    }
}
