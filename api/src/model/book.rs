use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    book::{
        event::{CreateBook, LoanUpdate, UpdateBook},
        Book, BookStatus,
    },
    id::BookId,
};
use serde::{Deserialize, Deserializer, Serialize};
use shared::error::AppError;

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookRequest {
    #[garde(range(min = 1))]
    pub code: i32,
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub author: String,
    #[garde(skip)]
    pub genre: String,
    #[garde(skip)]
    pub editor: String,
    #[garde(skip)]
    pub location: String,
    #[garde(skip)]
    #[serde(default)]
    pub reference: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub status: Option<BookStatus>,
}

impl From<CreateBookRequest> for CreateBook {
    fn from(value: CreateBookRequest) -> Self {
        let CreateBookRequest {
            code,
            title,
            author,
            genre,
            editor,
            location,
            reference,
            status,
        } = value;
        CreateBook {
            code,
            title,
            author,
            genre,
            editor,
            location,
            reference: reference.unwrap_or_default(),
            status: status.unwrap_or_default(),
        }
    }
}

// 省略された項目（None）と null（Some(None)）を区別して受け取る
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBookRequest {
    #[garde(range(min = 1))]
    pub code: i32,
    #[garde(length(min = 1))]
    pub title: String,
    #[garde(skip)]
    pub author: String,
    #[garde(skip)]
    pub genre: String,
    #[garde(skip)]
    pub editor: String,
    #[garde(skip)]
    pub location: String,
    #[garde(skip)]
    pub reference: String,
    #[garde(skip)]
    pub status: BookStatus,
    #[garde(skip)]
    #[serde(default, deserialize_with = "double_option")]
    pub currently_with: Option<Option<String>>,
    #[garde(skip)]
    #[serde(default, deserialize_with = "double_option")]
    pub expected_return: Option<Option<DateTime<Utc>>>,
}

pub struct UpdateBookRequestWithId(pub BookId, pub UpdateBookRequest);

impl TryFrom<UpdateBookRequestWithId> for UpdateBook {
    type Error = AppError;

    fn try_from(value: UpdateBookRequestWithId) -> Result<Self, Self::Error> {
        let UpdateBookRequestWithId(
            book_id,
            UpdateBookRequest {
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
            },
        ) = value;
        Ok(UpdateBook {
            book_id,
            code,
            title,
            author,
            genre,
            editor,
            location,
            reference,
            status,
            loan: LoanUpdate::parse(currently_with, expected_return)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BookListQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct DeleteBooksQuery {
    pub status: BookStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedBooksResponse {
    pub deleted: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookResponse {
    pub id: BookId,
    pub code: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub editor: String,
    pub location: String,
    pub reference: String,
    pub status: BookStatus,
    pub currently_with: Option<String>,
    pub expected_return: Option<DateTime<Utc>>,
}

impl From<Book> for BookResponse {
    fn from(value: Book) -> Self {
        let Book {
            id,
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
        Self {
            id,
            code,
            title,
            author,
            genre,
            editor,
            location,
            reference,
            status,
            currently_with: currently_with.map(|h| h.to_string()),
            expected_return,
        }
    }
}
