use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::domain::model::BorrowRecord;
use crate::checkout::domain::status::derive_status;
use crate::core::domain::ReferenceDto;
use crate::core::library::{LibraryError, LibraryResult};
use crate::gateway::source::WireFormat;
use crate::utils::date::{opt_serializer, serializer};

// BorrowRecordDto is the backend's json shape for a borrowed book: the book and
// member travel as embedded objects and a status string rides along.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRecordDto {
    #[serde(default, skip_serializing_if = "Option::is_none", deserialize_with = "crate::utils::id::deserialize_opt")]
    pub id: Option<String>,
    #[serde(default)]
    pub book: Option<ReferenceDto>,
    #[serde(default)]
    pub member: Option<ReferenceDto>,
    #[serde(with = "serializer")]
    pub borrow_date: NaiveDate,
    #[serde(with = "serializer")]
    pub due_date: NaiveDate,
    #[serde(default, with = "opt_serializer")]
    pub return_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: Option<String>,
}

impl BorrowRecordDto {
    pub fn from_record(record: &BorrowRecord, today: NaiveDate) -> Self {
        Self {
            id: Some(record.id.to_string()),
            book: Some(ReferenceDto::new(record.book_id.as_str())),
            member: Some(ReferenceDto::new(record.member_id.as_str())),
            borrow_date: record.borrow_date,
            due_date: record.due_date,
            return_date: record.return_date,
            status: Some(derive_status(record, today).wire_code().to_string()),
        }
    }
}

impl TryFrom<BorrowRecordDto> for BorrowRecord {
    type Error = LibraryError;

    fn try_from(other: BorrowRecordDto) -> LibraryResult<Self> {
        let id = other.id.ok_or_else(|| LibraryError::serialization("borrow record arrived without an id"))?;
        // dangling references are kept as empty ids and resolve to "Unknown" when joined
        Ok(Self {
            id,
            book_id: other.book.map(|b| b.id).unwrap_or_default(),
            member_id: other.member.map(|m| m.id).unwrap_or_default(),
            borrow_date: other.borrow_date,
            due_date: other.due_date,
            return_date: other.return_date,
        })
    }
}

impl WireFormat for BorrowRecord {
    type Dto = BorrowRecordDto;

    fn to_wire(&self, today: NaiveDate) -> BorrowRecordDto {
        BorrowRecordDto::from_record(self, today)
    }

    fn from_wire(dto: BorrowRecordDto) -> LibraryResult<Self> {
        BorrowRecord::try_from(dto)
    }
}
