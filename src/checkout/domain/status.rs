use std::fmt;
use std::fmt::{Display, Formatter};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::model::BorrowRecord;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Serialize, Deserialize)]
pub enum BorrowStatus {
    Active,
    Overdue { days_late: i64 },
    Returned,
}

impl BorrowStatus {
    pub fn is_overdue(&self) -> bool {
        matches!(self, BorrowStatus::Overdue { .. })
    }

    pub fn days_late(&self) -> i64 {
        match self {
            BorrowStatus::Overdue { days_late } => *days_late,
            _ => 0,
        }
    }

    // legacy status string stored by the backend next to each record
    pub fn wire_code(&self) -> &'static str {
        match self {
            BorrowStatus::Active => "BORROWED",
            BorrowStatus::Overdue { .. } => "OVERDUE",
            BorrowStatus::Returned => "RETURNED",
        }
    }
}

impl Display for BorrowStatus {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            BorrowStatus::Active => write!(f, "Active"),
            BorrowStatus::Overdue { days_late } if *days_late == 1 => write!(f, "Overdue (1 day)"),
            BorrowStatus::Overdue { days_late } => write!(f, "Overdue ({} days)", days_late),
            BorrowStatus::Returned => write!(f, "Returned"),
        }
    }
}

/// Derives the lifecycle state of a record as of `today`.
///
/// A returned record is always `Returned`. An active record becomes overdue only
/// once `today` is strictly after the due date, so a book due today is still
/// `Active`; the overdue magnitude is the number of whole days past due.
pub fn derive_status(record: &BorrowRecord, today: NaiveDate) -> BorrowStatus {
    if record.return_date.is_some() {
        return BorrowStatus::Returned;
    }
    if today > record.due_date {
        let days_late = (today - record.due_date).num_days().max(1);
        return BorrowStatus::Overdue { days_late };
    }
    BorrowStatus::Active
}
