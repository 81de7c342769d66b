use axum::Json;

use crate::{extractor::AuthorizedUser, model::role::RoleResponse};

pub async fn get_current_role(user: AuthorizedUser) -> Json<RoleResponse> {
    Json(RoleResponse {
        is_admin: user.is_admin(),
    })
}
