use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::auth::{AccessToken, Identity},
    repository::auth::AuthRepository,
};
use shared::error::{AppError, AppResult};

use crate::database::{model::auth::SessionRow, ConnectionPool};

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_identity_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<Identity>> {
        // 期限切れのセッションは存在しないものとして扱う
        sqlx::query_as::<_, SessionRow>(
            r#"
                SELECT email FROM sessions
                WHERE session_token = $1 AND expires_at > CURRENT_TIMESTAMP
            "#,
        )
        .bind(access_token.0.as_str())
        .fetch_optional(self.db.inner_ref())
        .await
        .map(|row| row.map(Identity::from))
        .map_err(AppError::SpecificOperationError)
    }

    async fn delete_token(&self, access_token: &AccessToken) -> AppResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_token = $1")
            .bind(access_token.0.as_str())
            .execute(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?;
        Ok(())
    }
}
