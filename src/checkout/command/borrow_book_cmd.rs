use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use crate::checkout::dto::BorrowRecordDto;
use crate::core::command::{Command, CommandError};
use crate::desk::SharedDesk;
use crate::utils::date::opt_serializer;

pub struct BorrowBookCommand {
    desk: SharedDesk,
}

impl BorrowBookCommand {
    pub fn new(desk: SharedDesk) -> Self {
        Self {
            desk,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowBookCommandRequest {
    pub book_id: String,
    pub member_id: String,
    #[serde(default, with = "opt_serializer")]
    pub borrow_date: Option<NaiveDate>,
    // defaults to the configured loan period after the borrow date
    #[serde(default, with = "opt_serializer")]
    pub due_date: Option<NaiveDate>,
}

impl BorrowBookCommandRequest {
    pub fn new(book_id: &str, member_id: &str) -> Self {
        Self {
            book_id: book_id.to_string(),
            member_id: member_id.to_string(),
            borrow_date: None,
            due_date: None,
        }
    }

    pub fn with_dates(mut self, borrow_date: NaiveDate, due_date: NaiveDate) -> Self {
        self.borrow_date = Some(borrow_date);
        self.due_date = Some(due_date);
        self
    }
}

#[derive(Debug, Serialize)]
pub struct BorrowBookCommandResponse {
    pub record: BorrowRecordDto,
}

impl BorrowBookCommandResponse {
    pub fn new(record: BorrowRecordDto) -> Self {
        Self {
            record,
        }
    }
}

#[async_trait]
impl Command<BorrowBookCommandRequest, BorrowBookCommandResponse> for BorrowBookCommand {
    async fn execute(&self, req: BorrowBookCommandRequest) -> Result<BorrowBookCommandResponse, CommandError> {
        let mut desk = self.desk.lock().await;
        let record = desk.borrow(req.book_id.as_str(), req.member_id.as_str(), req.borrow_date, req.due_date)
            .await.map_err(CommandError::from)?;
        Ok(BorrowBookCommandResponse::new(BorrowRecordDto::from_record(&record, desk.today())))
    }
}
