use chrono::{DateTime, Utc};
use shared::error::{AppError, AppResult};

use super::{event::LoanUpdate, Book};
use crate::model::student::StudentRef;

/// 本の貸出に関する 2 つの項目。貸出先があるときは返却予定日も必ずある
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LoanState {
    pub holder: Option<StudentRef>,
    pub expected_return: Option<DateTime<Utc>>,
}

impl LoanState {
    pub fn new(holder: Option<StudentRef>, expected_return: Option<DateTime<Utc>>) -> Self {
        Self {
            holder,
            expected_return,
        }
    }

    /// 更新内容を適用した後の状態を求める。
    /// 貸出先を消去すると返却予定日も消える。
    pub fn apply(self, update: &LoanUpdate) -> AppResult<Self> {
        let holder = update.currently_with.resolve(self.holder);
        let expected_return = match holder {
            None => None,
            Some(_) => update.expected_return.resolve(self.expected_return),
        };
        if holder.is_some() && expected_return.is_none() {
            return Err(missing_due_date());
        }
        Ok(Self {
            holder,
            expected_return,
        })
    }
}

impl LoanUpdate {
    // 永続化の前に呼ぶ。返却予定日のない貸出は記録できない
    pub fn validate(&self) -> AppResult<()> {
        if self.currently_with.is_set() && !self.expected_return.is_set() {
            return Err(missing_due_date());
        }
        Ok(())
    }
}

fn missing_due_date() -> AppError {
    AppError::InvalidRequest("a loan cannot be recorded without an expected return date".into())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoanTransition {
    NoChange,
    LoanStarted { holder: StudentRef },
    LoanEnded { previous_holder: StudentRef },
}

impl LoanTransition {
    pub fn between(previous: Option<StudentRef>, next: Option<StudentRef>) -> Self {
        match (previous, next) {
            (None, Some(holder)) => LoanTransition::LoanStarted { holder },
            (Some(prev), Some(holder)) if prev != holder => LoanTransition::LoanStarted { holder },
            (Some(previous_holder), None) => LoanTransition::LoanEnded { previous_holder },
            _ => LoanTransition::NoChange,
        }
    }
}

/// 更新の結果。通知の要否を判断するため、更新前の貸出先も返す
#[derive(Debug)]
pub struct UpdatedBook {
    pub previous_holder: Option<StudentRef>,
    pub book: Book,
}

impl UpdatedBook {
    pub fn transition(&self) -> LoanTransition {
        LoanTransition::between(self.previous_holder, self.book.currently_with)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::book::event::FieldUpdate;
    use chrono::TimeZone;
    use rstest::rstest;

    fn due() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 20, 0, 0, 0).unwrap()
    }

    fn hf(id: i64) -> StudentRef {
        StudentRef::new(id)
    }

    #[rstest]
    #[case(None, None, LoanTransition::NoChange)]
    #[case(None, Some(1234), LoanTransition::LoanStarted { holder: StudentRef::new(1234) })]
    #[case(Some(1234), None, LoanTransition::LoanEnded { previous_holder: StudentRef::new(1234) })]
    #[case(Some(1234), Some(1234), LoanTransition::NoChange)]
    #[case(Some(1234), Some(99), LoanTransition::LoanStarted { holder: StudentRef::new(99) })]
    fn detects_transition(
        #[case] previous: Option<i64>,
        #[case] next: Option<i64>,
        #[case] expected: LoanTransition,
    ) {
        let transition = LoanTransition::between(previous.map(hf), next.map(hf));
        assert_eq!(transition, expected);
    }

    #[rstest]
    #[case(FieldUpdate::Unchanged)]
    #[case(FieldUpdate::Clear)]
    fn loan_without_due_date_is_invalid(#[case] expected_return: FieldUpdate<DateTime<Utc>>) {
        let update = LoanUpdate::new(FieldUpdate::Set(hf(1234)), expected_return);
        assert!(matches!(update.validate(), Err(AppError::InvalidRequest(_))));
    }

    #[rstest]
    #[case(LoanUpdate::new(FieldUpdate::Set(StudentRef::new(1)), FieldUpdate::Set(due())))]
    #[case(LoanUpdate::new(FieldUpdate::Clear, FieldUpdate::Unchanged))]
    #[case(LoanUpdate::new(FieldUpdate::Clear, FieldUpdate::Clear))]
    #[case(LoanUpdate::default())]
    fn consistent_updates_pass_validation(#[case] update: LoanUpdate) {
        assert!(update.validate().is_ok());
    }

    #[test]
    fn clearing_holder_also_clears_due_date() {
        let on_loan = LoanState::new(Some(hf(1234)), Some(due()));
        let update = LoanUpdate::new(FieldUpdate::Clear, FieldUpdate::Unchanged);
        assert_eq!(on_loan.apply(&update).unwrap(), LoanState::default());
    }

    #[test]
    fn due_date_without_holder_is_dropped() {
        let update = LoanUpdate::new(FieldUpdate::Unchanged, FieldUpdate::Set(due()));
        assert_eq!(LoanState::default().apply(&update).unwrap(), LoanState::default());
    }

    #[test]
    fn clearing_due_date_of_active_loan_is_invalid() {
        let on_loan = LoanState::new(Some(hf(1234)), Some(due()));
        let update = LoanUpdate::new(FieldUpdate::Unchanged, FieldUpdate::Clear);
        assert!(matches!(
            on_loan.apply(&update),
            Err(AppError::InvalidRequest(_))
        ));
    }

    #[test]
    fn omitted_fields_keep_current_loan() {
        let on_loan = LoanState::new(Some(hf(1234)), Some(due()));
        assert_eq!(on_loan.apply(&LoanUpdate::default()).unwrap(), on_loan);
    }
}
