use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::books::domain::model::Book;
use crate::books::dto::BookDto;
use crate::core::command::{Command, CommandError};
use crate::desk::SharedDesk;

pub struct AddBookCommand {
    desk: SharedDesk,
}

impl AddBookCommand {
    pub fn new(desk: SharedDesk) -> Self {
        Self {
            desk,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddBookCommandRequest {
    pub title: String,
    pub category: String,
    pub publishing_year: i32,
    #[serde(default)]
    pub isbn: Option<String>,
    pub total_copies: u32,
    pub author_id: String,
}

impl AddBookCommandRequest {
    pub fn new(title: &str, category: &str, publishing_year: i32, total_copies: u32, author_id: &str) -> Self {
        Self {
            title: title.to_string(),
            category: category.to_string(),
            publishing_year,
            isbn: None,
            total_copies,
            author_id: author_id.to_string(),
        }
    }

    pub fn build_book(&self) -> Book {
        let book = Book::new(self.title.as_str(), self.category.as_str(), self.publishing_year,
                             self.total_copies, self.author_id.as_str());
        match &self.isbn {
            Some(isbn) => book.with_isbn(isbn.as_str()),
            None => book,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct AddBookCommandResponse {
    pub book: BookDto,
}

impl AddBookCommandResponse {
    pub fn new(book: BookDto) -> Self {
        Self {
            book,
        }
    }
}

#[async_trait]
impl Command<AddBookCommandRequest, AddBookCommandResponse> for AddBookCommand {
    async fn execute(&self, req: AddBookCommandRequest) -> Result<AddBookCommandResponse, CommandError> {
        let book = req.build_book();
        self.desk.lock().await.add_book(book).await
            .map_err(CommandError::from).map(|saved| AddBookCommandResponse::new(BookDto::from(&saved)))
    }
}
