use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use crate::authors::domain::model::Author;
use crate::authors::dto::AuthorDto;
use crate::core::command::{Command, CommandError};
use crate::desk::SharedDesk;

pub struct AddAuthorCommand {
    desk: SharedDesk,
}

impl AddAuthorCommand {
    pub fn new(desk: SharedDesk) -> Self {
        Self {
            desk,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AddAuthorCommandRequest {
    pub name: String,
    #[serde(default)]
    pub biography: Option<String>,
    #[serde(default)]
    pub nationality: Option<String>,
}

impl AddAuthorCommandRequest {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            biography: None,
            nationality: None,
        }
    }

    pub fn build_author(&self) -> Author {
        let mut author = Author::new(self.name.as_str());
        author.biography = self.biography.clone();
        author.nationality = self.nationality.clone();
        author
    }
}

#[derive(Debug, Serialize)]
pub struct AddAuthorCommandResponse {
    pub author: AuthorDto,
}

impl AddAuthorCommandResponse {
    pub fn new(author: AuthorDto) -> Self {
        Self {
            author,
        }
    }
}

#[async_trait]
impl Command<AddAuthorCommandRequest, AddAuthorCommandResponse> for AddAuthorCommand {
    async fn execute(&self, req: AddAuthorCommandRequest) -> Result<AddAuthorCommandResponse, CommandError> {
        self.desk.lock().await.add_author(req.build_author()).await
            .map_err(CommandError::from).map(|saved| AddAuthorCommandResponse::new(AuthorDto::from(&saved)))
    }
}
