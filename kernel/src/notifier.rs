use async_trait::async_trait;
use thiserror::Error;

use crate::model::notification::Notification;

// 通知の失敗は呼び出し元に返さない。AppError への変換を用意していないのはそのため
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("failed to compose notification: {0}")]
    Compose(String),
    #[error("failed to deliver notification: {0}")]
    Delivery(String),
}

pub type NotificationResult<T> = Result<T, NotificationError>;

#[mockall::automock]
#[async_trait]
pub trait Notifier: Send + Sync {
    // 設定された固定の宛先に送る
    async fn send(&self, notification: Notification) -> NotificationResult<()>;
}
