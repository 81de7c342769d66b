use axum::{async_trait, extract::FromRequestParts, http::request::Parts, RequestPartsExt};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use kernel::model::{
    auth::{AccessToken, Identity},
    role::Role,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// リクエストの前処理を実行後、handler に渡す構造体を定義
pub struct AuthorizedUser {
    pub access_token: AccessToken,
    pub identity: Identity,
    pub role: Role,
}

impl AuthorizedUser {
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    // 変更系の handler は入力の検証より先にこれを呼ぶ
    pub fn ensure_admin(&self) -> AppResult<()> {
        self.role.ensure_admin()
    }
}

#[async_trait]
impl FromRequestParts<AppRegistry> for AuthorizedUser {
    type Rejection = AppError;

    // handler メソッドの引数に AuthorizedUser を追加したときはこのメソッドが呼ばれる
    async fn from_request_parts(
        parts: &mut Parts,
        registry: &AppRegistry,
    ) -> Result<Self, Self::Rejection> {
        // HTTP ヘッダからアクセストークンを取り出す
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AppError::UnauthenticatedError)?;
        let access_token = AccessToken(bearer.token().to_string());

        // アクセストークンが紐づく利用者を引く
        let identity = registry
            .auth_repository()
            .fetch_identity_from_token(&access_token)
            .await?
            .ok_or(AppError::UnauthenticatedError)?;

        // 管理者リストに含まれるかどうかで権限を決める
        let role = registry.resolve_role(&identity);

        Ok(Self {
            access_token,
            identity,
            role,
        })
    }
}
