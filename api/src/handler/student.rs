use axum::{extract::State, Json};
use chrono::{Datelike, Utc};
use registry::AppRegistry;
use shared::error::AppResult;

use crate::{extractor::AuthorizedUser, model::student::StudentResponse};

#[tracing::instrument(skip(user, registry), fields(user = %user.identity))]
pub async fn show_student_list(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<Vec<StudentResponse>>> {
    let current_year = Utc::now().year();
    registry
        .roster_repository()
        .find_all()
        .await
        .map(|students| {
            Json(
                students
                    .into_iter()
                    .map(|s| StudentResponse::new(s, current_year))
                    .collect(),
            )
        })
}
