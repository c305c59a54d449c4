use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::checkout::dto::BorrowRecordDto;
use crate::core::command::{Command, CommandError};
use crate::desk::SharedDesk;

pub struct DeleteRecordCommand {
    desk: SharedDesk,
}

impl DeleteRecordCommand {
    pub fn new(desk: SharedDesk) -> Self {
        Self {
            desk,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRecordCommandRequest {
    record_id: String,
}

impl DeleteRecordCommandRequest {
    pub fn new(record_id: &str) -> Self {
        Self {
            record_id: record_id.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct DeleteRecordCommandResponse {
    pub record: BorrowRecordDto,
}

impl DeleteRecordCommandResponse {
    pub fn new(record: BorrowRecordDto) -> Self {
        Self {
            record,
        }
    }
}

#[async_trait]
impl Command<DeleteRecordCommandRequest, DeleteRecordCommandResponse> for DeleteRecordCommand {
    async fn execute(&self, req: DeleteRecordCommandRequest) -> Result<DeleteRecordCommandResponse, CommandError> {
        let mut desk = self.desk.lock().await;
        let record = desk.delete_record(req.record_id.as_str()).await.map_err(CommandError::from)?;
        Ok(DeleteRecordCommandResponse::new(BorrowRecordDto::from_record(&record, desk.today())))
    }
}
