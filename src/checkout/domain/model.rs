use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use crate::checkout::domain::status::{derive_status, BorrowStatus};
use crate::core::domain::Identifiable;
use crate::utils::date::{opt_serializer, serializer};

// BorrowRecord abstracts one lending of a book copy to a member. It only holds
// ids; joining with the book and member happens on the read side.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecord {
    pub id: String,
    pub book_id: String,
    pub member_id: String,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDate,
    #[serde(with = "serializer")]
    pub due_date: NaiveDate,
    #[serde(default, with = "opt_serializer")]
    pub return_date: Option<NaiveDate>,
}

impl BorrowRecord {
    pub fn new(book_id: &str, member_id: &str, borrow_date: NaiveDate, due_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            book_id: book_id.to_string(),
            member_id: member_id.to_string(),
            borrow_date,
            due_date,
            return_date: None,
        }
    }

    pub fn is_active(&self) -> bool {
        self.return_date.is_none()
    }

    pub fn is_returned(&self) -> bool {
        self.return_date.is_some()
    }

    pub fn status(&self, today: NaiveDate) -> BorrowStatus {
        derive_status(self, today)
    }
}

impl Identifiable for BorrowRecord {
    fn id(&self) -> String {
        self.id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::checkout::domain::model::BorrowRecord;

    #[tokio::test]
    async fn test_should_build_borrow_record() {
        let borrowed = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        let due = NaiveDate::from_ymd_opt(2024, 5, 15).expect("valid date");
        let record = BorrowRecord::new("book1", "member1", borrowed, due);
        assert_eq!("book1", record.book_id.as_str());
        assert_eq!("member1", record.member_id.as_str());
        assert!(record.is_active());
        assert!(!record.is_returned());
    }

    #[tokio::test]
    async fn test_should_serialize_iso_dates() {
        let borrowed = NaiveDate::from_ymd_opt(2024, 5, 1).expect("valid date");
        let due = NaiveDate::from_ymd_opt(2024, 5, 15).expect("valid date");
        let record = BorrowRecord::new("book1", "member1", borrowed, due);
        let json = serde_json::to_value(&record).expect("should serialize");
        assert_eq!("2024-05-01", json["borrowDate"]);
        assert!(json["returnDate"].is_null());
        let back: BorrowRecord = serde_json::from_value(json).expect("should deserialize");
        assert_eq!(record, back);
    }
}
