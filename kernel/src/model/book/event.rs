use chrono::{DateTime, Utc};
use derive_new::new;
use shared::error::AppResult;

use super::BookStatus;
use crate::model::{id::BookId, student::StudentRef};

#[derive(Debug, new)]
pub struct CreateBook {
    pub code: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub editor: String,
    pub location: String,
    pub reference: String,
    pub status: BookStatus,
}

#[derive(Debug, new)]
pub struct UpdateBook {
    pub book_id: BookId,
    pub code: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub editor: String,
    pub location: String,
    pub reference: String,
    pub status: BookStatus,
    pub loan: LoanUpdate,
}

#[derive(Debug, new)]
pub struct DeleteBook {
    pub book_id: BookId,
}

#[derive(Debug, new)]
pub struct DeleteBooksByStatus {
    pub status: BookStatus,
}

/// 更新リクエストで項目が省略されたのか、null で消去されたのか、値が指定されたのかを区別する
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    Unchanged,
    Clear,
    Set(T),
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::Unchanged
    }
}

impl<T> FieldUpdate<T> {
    pub fn from_patch(patch: Option<Option<T>>) -> Self {
        match patch {
            None => FieldUpdate::Unchanged,
            Some(None) => FieldUpdate::Clear,
            Some(Some(value)) => FieldUpdate::Set(value),
        }
    }

    pub fn is_set(&self) -> bool {
        matches!(self, FieldUpdate::Set(_))
    }

    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            FieldUpdate::Unchanged => current,
            FieldUpdate::Clear => None,
            FieldUpdate::Set(value) => Some(value),
        }
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, new)]
pub struct LoanUpdate {
    pub currently_with: FieldUpdate<StudentRef>,
    pub expected_return: FieldUpdate<DateTime<Utc>>,
}

impl LoanUpdate {
    /// 貸出先の文字列をパースする。空文字は貸出先の消去として扱う
    pub fn parse(
        currently_with: Option<Option<String>>,
        expected_return: Option<Option<DateTime<Utc>>>,
    ) -> AppResult<Self> {
        let currently_with = match currently_with {
            None => FieldUpdate::Unchanged,
            Some(None) => FieldUpdate::Clear,
            Some(Some(raw)) if raw.trim().is_empty() => FieldUpdate::Clear,
            Some(Some(raw)) => FieldUpdate::Set(raw.trim().parse::<StudentRef>()?),
        };
        Ok(Self {
            currently_with,
            expected_return: FieldUpdate::from_patch(expected_return),
        })
    }
}
