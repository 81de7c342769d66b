use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::auth::{AccessToken, Identity};

#[mockall::automock]
#[async_trait]
pub trait AuthRepository: Send + Sync {
    // 有効期限内のセッションに紐づく利用者を返す
    async fn fetch_identity_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<Identity>>;

    async fn delete_token(&self, access_token: &AccessToken) -> AppResult<()>;
}
