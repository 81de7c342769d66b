use std::collections::HashSet;

use shared::error::{AppError, AppResult};

use super::auth::Identity;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Member,
}

impl Role {
    pub fn resolve(identity: &Identity, admins: &HashSet<String>) -> Self {
        if is_admin(identity, admins) {
            Role::Admin
        } else {
            Role::Member
        }
    }

    pub fn is_admin(self) -> bool {
        self == Role::Admin
    }

    // 変更系の操作はすべて管理者に限定する
    pub fn ensure_admin(self) -> AppResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::UnauthorizedError)
        }
    }
}

/// 設定された管理者リストに含まれていれば管理者とみなす。
pub fn is_admin(identity: &Identity, admins: &HashSet<String>) -> bool {
    admins.contains(identity.email())
}
