use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::student::{Student, StudentId};

// 外部の名簿データベースに対する読み取り専用の問い合わせ
#[mockall::automock]
#[async_trait]
pub trait RosterRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Student>>;
    async fn find_by_id(&self, student_id: StudentId) -> AppResult<Option<Student>>;
}
