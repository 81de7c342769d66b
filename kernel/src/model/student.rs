use std::{fmt, str::FromStr};

use shared::error::AppError;

// 名簿上の学籍番号に付く固定の接頭辞
const STUDENT_REF_PREFIX: &str = "HF";

pub type StudentId = i64;

/// 名簿データベース上の生徒。読み取り専用
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub student_id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub admission_year: i32,
    pub repeated_years: i32,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    pub fn reference(&self) -> StudentRef {
        StudentRef::new(self.student_id)
    }

    /// 入学年と留年回数から、指定した年に在籍している学年を求める
    pub fn course(&self, current_year: i32) -> i32 {
        current_year - self.admission_year - self.repeated_years + 1
    }
}

/// 本の貸出先を表す "HF" + 学籍番号 の参照
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StudentRef(StudentId);

impl StudentRef {
    pub fn new(student_id: StudentId) -> Self {
        Self(student_id)
    }

    pub fn student_id(&self) -> StudentId {
        self.0
    }
}

impl FromStr for StudentRef {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidRequest(format!("invalid student reference: {s}"));
        let digits = s.strip_prefix(STUDENT_REF_PREFIX).ok_or_else(invalid)?;
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(invalid());
        }
        digits.parse::<StudentId>().map(Self).map_err(|_| invalid())
    }
}

impl fmt::Display for StudentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{STUDENT_REF_PREFIX}{}", self.0)
    }
}
