use axum::{http::StatusCode, response::IntoResponse};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    InvalidRequest(String),
    #[error("{0}")]
    EntityNotFound(String),
    #[error("{0}")]
    ValidationError(#[from] garde::Report),
    #[error("{0}")]
    ConflictError(String),
    // sqlx::Errorを引数にするヴァリアントが複数あるので、[from]は使えず、[source]で代用している
    #[error("トランザクションを実行できませんでした。")]
    TransactionError(#[source] sqlx::Error),
    #[error("データベース処理実行中にエラーが発生しました。")]
    SpecificOperationError(#[source] sqlx::Error),
    #[error("ログインに失敗しました")]
    UnauthenticatedError,
    #[error("認可情報が間違っています")]
    UnauthorizedError,
    #[error("{0}")]
    ConversionEntityError(String),
}

impl AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidRequest(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::EntityNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ConflictError(_) => StatusCode::CONFLICT,
            AppError::UnauthenticatedError => StatusCode::FORBIDDEN,
            AppError::UnauthorizedError => StatusCode::UNAUTHORIZED,
            AppError::TransactionError(_)
            | AppError::SpecificOperationError(_)
            | AppError::ConversionEntityError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status_code = self.status_code();
        if status_code.is_server_error() {
            tracing::error!(
                error.cause_chain = ?self,
                error.message = %self,
                "Unexpected error happened"
            );
            return status_code.into_response();
        }
        // クライアント起因のエラーはメッセージを本文に載せて返す
        (status_code, self.to_string()).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(AppError::UnauthorizedError, StatusCode::UNAUTHORIZED)]
    #[case(AppError::UnauthenticatedError, StatusCode::FORBIDDEN)]
    #[case(AppError::ConflictError("code".into()), StatusCode::CONFLICT)]
    #[case(AppError::InvalidRequest("due date".into()), StatusCode::BAD_REQUEST)]
    #[case(AppError::EntityNotFound("book".into()), StatusCode::NOT_FOUND)]
    #[case(
        AppError::SpecificOperationError(sqlx::Error::RowNotFound),
        StatusCode::INTERNAL_SERVER_ERROR
    )]
    fn maps_to_status_code(#[case] error: AppError, #[case] expected: StatusCode) {
        assert_eq!(error.into_response().status(), expected);
    }
}
