use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::dto::BorrowRecordDto;
use crate::core::command::{Command, CommandError};
use crate::desk::SharedDesk;

pub struct ReturnBookCommand {
    desk: SharedDesk,
}

impl ReturnBookCommand {
    pub fn new(desk: SharedDesk) -> Self {
        Self {
            desk,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBookCommandRequest {
    record_id: String,
}

impl ReturnBookCommandRequest {
    pub fn new(record_id: &str) -> Self {
        Self {
            record_id: record_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReturnBookCommandResponse {
    pub record: BorrowRecordDto,
}

impl ReturnBookCommandResponse {
    pub fn new(record: BorrowRecordDto) -> Self {
        Self {
            record,
        }
    }
}

#[async_trait]
impl Command<ReturnBookCommandRequest, ReturnBookCommandResponse> for ReturnBookCommand {
    async fn execute(&self, req: ReturnBookCommandRequest) -> Result<ReturnBookCommandResponse, CommandError> {
        let mut desk = self.desk.lock().await;
        let record = desk.return_book(req.record_id.as_str()).await.map_err(CommandError::from)?;
        Ok(ReturnBookCommandResponse::new(BorrowRecordDto::from_record(&record, desk.today())))
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use crate::checkout::command::return_book_cmd::{ReturnBookCommand, ReturnBookCommandRequest};
    use crate::core::command::{Command, CommandError};
    use crate::desk::factory::create_test_desk;

    #[tokio::test]
    async fn test_should_run_return_book() {
        let desk = create_test_desk().await;
        let record = desk.lock().await.store().active_records()[0].clone();
        let cmd = ReturnBookCommand::new(desk.clone());
        let res = cmd.execute(ReturnBookCommandRequest::new(record.id.as_str())).await.expect("should return book");
        assert_eq!(NaiveDate::from_ymd_opt(2024, 6, 10), res.record.return_date);
        assert_eq!(Some("RETURNED".to_string()), res.record.status);

        let again = cmd.execute(ReturnBookCommandRequest::new(record.id.as_str())).await;
        assert!(matches!(again, Err(CommandError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_should_not_return_unknown_record() {
        let desk = create_test_desk().await;
        let res = ReturnBookCommand::new(desk).execute(ReturnBookCommandRequest::new("missing")).await;
        assert!(matches!(res, Err(CommandError::NotFound { .. })));
    }
}
