use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::desk::SharedDesk;

pub struct UpdateBookCommand {
    desk: SharedDesk,
}

impl UpdateBookCommand {
    pub fn new(desk: SharedDesk) -> Self {
        Self {
            desk,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct UpdateBookCommandRequest {
    pub book: BookDto,
}

impl UpdateBookCommandRequest {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateBookCommandResponse {
    pub book: BookDto,
}

impl UpdateBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<UpdateBookCommandRequest, UpdateBookCommandResponse> for UpdateBookCommand {
    async fn execute(&self, req: UpdateBookCommandRequest) -> Result<UpdateBookCommandResponse, CommandError> {
        let book = Book::try_from(req.book).map_err(CommandError::from)?;
        self.desk.lock().await.update_book(book).await
            .map_err(CommandError::from).map(|saved| UpdateBookCommandResponse::new(BookDto::from(&saved)))
    }
}
