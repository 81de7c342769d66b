use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use super::{id::BookId, student::StudentRef};

pub mod event;
pub mod lending;
pub mod search;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub code: i32,
    pub title: String,
    pub author: String,
    pub genre: String,
    pub editor: String,
    pub location: String,
    pub reference: String,
    pub status: BookStatus,
    pub currently_with: Option<StudentRef>,
    pub expected_return: Option<DateTime<Utc>>,
}

impl Book {
    // 貸出中でなければ「棚にある」状態
    pub fn is_on_shelf(&self) -> bool {
        self.currently_with.is_none()
    }
}

#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    AsRefStr,
    Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BookStatus {
    #[default]
    Active,
    Inactive,
    Lost,
    Damaged,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::str::FromStr;

    #[rstest]
    #[case("active", BookStatus::Active)]
    #[case("inactive", BookStatus::Inactive)]
    #[case("lost", BookStatus::Lost)]
    #[case("damaged", BookStatus::Damaged)]
    fn status_uses_lowercase_names(#[case] raw: &str, #[case] status: BookStatus) {
        assert_eq!(BookStatus::from_str(raw).unwrap(), status);
        assert_eq!(status.as_ref(), raw);
        // JSON 上の表記もデータベースと揃える
        assert_eq!(serde_json::to_value(status).unwrap(), raw);
        assert_eq!(
            serde_json::from_value::<BookStatus>(raw.into()).unwrap(),
            status
        );
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(BookStatus::from_str("borrowed").is_err());
    }
}
