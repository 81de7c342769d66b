use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::student::{Student, StudentId},
    repository::roster::RosterRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::student::StudentRow, ConnectionPool};

// 名簿は学校側の別データベースにあり、参照のみ行う
#[derive(new)]
pub struct RosterRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl RosterRepository for RosterRepositoryImpl {
    async fn find_all(&self) -> AppResult<Vec<Student>> {
        let rows = sqlx::query_as::<_, StudentRow>(
            r#"
                SELECT student_id, first_name, last_name, admission_year, repeated_years
                FROM students
                ORDER BY last_name ASC, first_name ASC
            "#,
        )
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Student::from).collect())
    }

    async fn find_by_id(&self, student_id: StudentId) -> AppResult<Option<Student>> {
        let row = sqlx::query_as::<_, StudentRow>(
            r#"
                SELECT student_id, first_name, last_name, admission_year, repeated_years
                FROM students
                WHERE student_id = $1
            "#,
        )
        .bind(student_id)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(row.map(Student::from))
    }
}
